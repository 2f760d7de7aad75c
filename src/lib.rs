//! Extract `#proto`-tagged code cells from notebooks into dated source files.
//!
//! The crate scans a notebook folder once or watches it for changes, and
//! remembers the last folder it was pointed at.

pub mod cli;
pub mod config;
pub mod logging;
pub mod notebook;
pub mod scanner;
pub mod store;
pub mod vcs;
pub mod watcher;

pub use config::Settings;
pub use notebook::{Extractor, Notebook};
pub use scanner::{FolderScanner, ScanOutcome, ScanReport};
pub use store::PathStore;
pub use vcs::{CommitLookup, GitCommitLookup};
pub use watcher::{NotebookWatcher, start_daemon};
