//! Default folder updates.

use std::path::Path;

use crate::store::{PathStore, StoreResult};

/// Store `target` as the default notebook folder.
pub fn run(store: &mut PathStore, target: &Path) -> StoreResult<()> {
    store.save(target)?;
    crate::log_event!("store", "default path set", "{}", target.display());
    Ok(())
}
