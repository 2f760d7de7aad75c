//! Long-running watch loop over the default notebook folder.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;

use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::WatchConfig;
use crate::notebook::Extractor;
use crate::store::PathStore;

use super::{Debouncer, NotebookHandler, WatchError};

/// How the daemon stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonExit {
    /// No default folder stored; the daemon never started.
    NoDefaultPath,
    /// Shutdown was requested.
    Stopped,
}

/// Recursive watcher over one notebook folder.
pub struct NotebookWatcher {
    root: PathBuf,
    handler: NotebookHandler,
    /// Channel for receiving file events.
    event_rx: mpsc::Receiver<notify::Result<Event>>,
    /// The underlying file watcher, dropped to unsubscribe.
    watcher: notify::RecommendedWatcher,
}

impl NotebookWatcher {
    /// Subscribe to events under `root`.
    pub fn new(
        root: &Path,
        handler: NotebookHandler,
        channel_capacity: usize,
    ) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::channel(channel_capacity.max(1));

        // notify delivers on its own thread
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.blocking_send(res);
        })?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            root: root.to_path_buf(),
            handler,
            event_rx: rx,
            watcher,
        })
    }

    /// Watch until Ctrl-C.
    pub async fn watch(self) -> Result<(), WatchError> {
        self.watch_until(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => crate::log_event!("watcher", "interrupted"),
                Err(e) => {
                    // Without a signal listener the loop runs until the channel closes
                    tracing::error!("[watcher] failed to listen for ctrl+c: {e}");
                    std::future::pending::<()>().await
                }
            }
        })
        .await
    }

    /// Watch until `shutdown` completes.
    ///
    /// Events are handled one at a time; an extraction error ends the loop.
    pub async fn watch_until(
        mut self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), WatchError> {
        crate::log_event!("watcher", "started", "{}", self.root.display());
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,

                event = self.event_rx.recv() => {
                    match event {
                        Some(Ok(event)) => {
                            self.handler.on_event(&event, Instant::now())?;
                        }
                        Some(Err(e)) => {
                            tracing::error!("[watcher] file watch error: {e}");
                        }
                        None => break,
                    }
                }
            }
        }

        if let Err(e) = self.watcher.unwatch(&self.root) {
            crate::debug_event!("watcher", "unwatch failed", "{e}");
        }
        crate::log_event!("watcher", "stopped");
        Ok(())
    }
}

/// Watch the stored default folder until interrupted.
///
/// Without a stored default this logs an error and returns immediately.
pub async fn start_daemon(
    store: &PathStore,
    extractor: Extractor,
    config: &WatchConfig,
) -> Result<DaemonExit, WatchError> {
    let Some(root) = store.get() else {
        tracing::error!(
            "[watcher] no default path stored in {}, cannot start daemon",
            store.file().display()
        );
        return Ok(DaemonExit::NoDefaultPath);
    };

    // Saves in the first window after startup are dropped
    let debouncer = Debouncer::started_at(config.debounce(), Instant::now());
    let handler = NotebookHandler::new(extractor, debouncer);
    NotebookWatcher::new(root, handler, config.channel_capacity)?
        .watch()
        .await?;
    Ok(DaemonExit::Stopped)
}
