//! One-shot folder scan.

use std::path::Path;

use crate::notebook::Extractor;
use crate::scanner::{FolderScanner, ScanError, ScanOutcome};
use crate::store::PathStore;

/// Scan `folder`, or the stored default when `None`.
pub fn run(
    extractor: &Extractor,
    store: &mut PathStore,
    folder: Option<&Path>,
) -> Result<ScanOutcome, ScanError> {
    FolderScanner::new(extractor, store).extract_from_folder(folder)
}
