//! One-shot extraction over a folder of notebooks.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::notebook::{ExtractError, Extractor};
use crate::store::{PathStore, StoreError};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Failed to walk notebook folder: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result of a completed scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Root folder that was scanned.
    pub root: PathBuf,
    /// Notebooks parsed.
    pub notebooks: usize,
    /// Files written, in processing order.
    pub generated: Vec<PathBuf>,
}

/// How a scan request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// No folder given and no default stored; nothing was done.
    NoDefaultPath,
    Completed(ScanReport),
}

/// Walks a folder tree and extracts every notebook in it.
pub struct FolderScanner<'a> {
    extractor: &'a Extractor,
    store: &'a mut PathStore,
}

impl<'a> FolderScanner<'a> {
    pub fn new(extractor: &'a Extractor, store: &'a mut PathStore) -> Self {
        Self { extractor, store }
    }

    /// Extract all notebooks under `folder`, or under the stored default.
    ///
    /// An explicit folder becomes the new stored default. The first failing
    /// notebook aborts the scan.
    pub fn extract_from_folder(&mut self, folder: Option<&Path>) -> Result<ScanOutcome, ScanError> {
        let root = match folder {
            Some(folder) => {
                self.store.save(folder)?;
                folder.to_path_buf()
            }
            None => match self.store.get() {
                Some(default) => default.to_path_buf(),
                None => {
                    tracing::error!(
                        "[scan] no folder given and no default path stored in {}",
                        self.store.file().display()
                    );
                    return Ok(ScanOutcome::NoDefaultPath);
                }
            },
        };

        crate::log_event!("scan", "folder", "{}", root.display());

        let mut report = ScanReport {
            root: root.clone(),
            ..ScanReport::default()
        };

        for notebook in find_notebooks(&root, self.extractor) {
            let notebook = notebook?;
            crate::log_event!("scan", "notebook", "{}", notebook.display());
            report.notebooks += 1;
            if let Some(generated) = self.extractor.extract_code_blocks(&notebook)? {
                report.generated.push(generated);
            }
        }

        crate::log_event!(
            "scan",
            "done",
            "{} notebooks, {} files generated",
            report.notebooks,
            report.generated.len()
        );
        Ok(ScanOutcome::Completed(report))
    }
}

/// Notebook files under `root`, recursively, in traversal order.
pub fn find_notebooks<'a>(
    root: &Path,
    extractor: &'a Extractor,
) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() && extractor.is_notebook(entry.path()) => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
}
