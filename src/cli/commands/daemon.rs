//! Watch mode.

use crate::config::Settings;
use crate::notebook::Extractor;
use crate::store::PathStore;
use crate::watcher::{DaemonExit, WatchError, start_daemon};

/// Run the watcher over the stored default folder until Ctrl-C.
pub async fn run(
    settings: &Settings,
    store: &PathStore,
    extractor: Extractor,
) -> Result<DaemonExit, WatchError> {
    start_daemon(store, extractor, &settings.watch).await
}
