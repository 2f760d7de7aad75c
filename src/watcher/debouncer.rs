//! Debouncing of notebook change events.
//!
//! One timestamp is shared by every file under the watched root: after an
//! event is processed, all further events are dropped until the window has
//! passed, whichever notebook they belong to. Dropped events are not queued.

use std::time::{Duration, Instant};

/// Global debounce gate.
#[derive(Debug)]
pub struct Debouncer {
    /// When the last event was let through.
    last_processed: Option<Instant>,
    /// Minimum gap between two processed events.
    window: Duration,
}

impl Debouncer {
    /// A gate that lets the first event through.
    pub fn new(window: Duration) -> Self {
        Self {
            last_processed: None,
            window,
        }
    }

    /// A gate whose first window opens at `start`.
    ///
    /// Events before `start + window` are dropped, as if one had just been
    /// processed.
    pub fn started_at(window: Duration, start: Instant) -> Self {
        Self {
            last_processed: Some(start),
            window,
        }
    }

    /// Decide whether an event arriving at `now` should be processed.
    ///
    /// Accepting an event restarts the window.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        let ready = match self.last_processed {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.window,
        };
        if ready {
            self.last_processed = Some(now);
        }
        ready
    }

    #[cfg(test)]
    fn last_processed(&self) -> Option<Instant> {
        self.last_processed
    }
}
