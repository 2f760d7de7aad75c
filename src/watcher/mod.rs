//! Notebook folder watcher.
//!
//! A single recursive `notify::RecommendedWatcher` feeds events into a tokio
//! loop that extracts modified notebooks.
//!
//! # Architecture
//!
//! ```text
//! NotebookWatcher
//!   - notify::RecommendedWatcher (own thread)
//!   - mpsc channel -> event loop
//!         |
//!   NotebookHandler
//!     - Debouncer (one window for all files)
//!     - Extractor
//! ```

mod daemon;
mod debouncer;
mod error;
mod handler;

pub use daemon::{DaemonExit, NotebookWatcher, start_daemon};
pub use debouncer::Debouncer;
pub use error::WatchError;
pub use handler::NotebookHandler;
