//! Routing of file events to the extractor.

use std::path::{Path, PathBuf};
use std::time::Instant;

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};

use crate::notebook::Extractor;

use super::{Debouncer, WatchError};

/// Extracts notebooks as their modification events come in.
pub struct NotebookHandler {
    extractor: Extractor,
    debouncer: Debouncer,
}

impl NotebookHandler {
    pub fn new(extractor: Extractor, debouncer: Debouncer) -> Self {
        Self {
            extractor,
            debouncer,
        }
    }

    /// Check if this handler should process events for the given path.
    pub fn matches(&self, path: &Path) -> bool {
        self.extractor.is_notebook(path) && !path.is_dir()
    }

    /// Handle one notify event received at `now`.
    ///
    /// Returns the notebooks that were extracted. Extraction errors are
    /// returned to the caller untouched.
    pub fn on_event(&mut self, event: &Event, now: Instant) -> Result<Vec<PathBuf>, WatchError> {
        if !is_modification(&event.kind) {
            return Ok(Vec::new());
        }

        let mut processed = Vec::new();
        for path in &event.paths {
            if !self.matches(path) {
                crate::debug_event!(
                    "watcher",
                    "unmatched",
                    "{:?} {}",
                    event.kind,
                    path.display()
                );
                continue;
            }
            if !path.exists() {
                crate::debug_event!("watcher", "vanished", "{}", path.display());
                continue;
            }
            if !self.debouncer.try_acquire(now) {
                crate::debug_event!("watcher", "debounced", "{}", path.display());
                continue;
            }

            crate::log_event!("watcher", "modified", "{}", path.display());
            if let Some(output) = self.extractor.extract_code_blocks(path)? {
                crate::log_event!("watcher", "generated", "{}", output.display());
            }
            processed.push(path.clone());
        }
        Ok(processed)
    }
}

/// Content or name changes; the source side of a rename is skipped.
fn is_modification(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(modify) if !matches!(modify, ModifyKind::Name(RenameMode::From))
    )
}
