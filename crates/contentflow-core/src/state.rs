//! Shared application state: the current result, loading flag, and error.
//!
//! A single [`ContentStore`] is owned by the [`Studio`](crate::Studio) that
//! writes to it. Views hold a [`StoreReader`] and only ever read or wait for
//! changes.

use std::sync::Arc;

use tokio::sync::watch;

use crate::result::ContentResult;

/// Point-in-time view of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub current: Option<Arc<ContentResult>>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Single-writer container for the current result.
#[derive(Debug)]
pub struct ContentStore {
    tx: watch::Sender<Snapshot>,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore {
    /// Empty store: no result, not loading, no error.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Snapshot::default());
        Self { tx }
    }

    /// Read-only handle for views.
    pub fn subscribe(&self) -> StoreReader {
        StoreReader {
            rx: self.tx.subscribe(),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// The current result, if any.
    pub fn get(&self) -> Option<Arc<ContentResult>> {
        self.tx.borrow().current.clone()
    }

    /// Replace the current result.
    pub fn set(&self, result: ContentResult) -> Arc<ContentResult> {
        let result = Arc::new(result);
        let stored = Arc::clone(&result);
        self.tx.send_modify(|s| s.current = Some(stored));
        result
    }

    /// Drop the current result and any error.
    pub fn clear(&self) {
        self.tx.send_modify(|s| {
            s.current = None;
            s.error = None;
        });
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.tx.borrow().loading
    }

    /// Message of the last propagated failure.
    pub fn error(&self) -> Option<String> {
        self.tx.borrow().error.clone()
    }

    /// Mark a request as started, clearing the previous error.
    ///
    /// Returns `false` without touching anything if a request is already
    /// loading.
    pub(crate) fn begin_request(&self) -> bool {
        self.tx.send_if_modified(|s| {
            if s.loading {
                return false;
            }
            s.loading = true;
            s.error = None;
            true
        })
    }

    /// Record a propagated failure.
    pub(crate) fn fail(&self, message: String) {
        self.tx.send_modify(|s| s.error = Some(message));
    }

    pub(crate) fn finish_request(&self) {
        self.tx.send_modify(|s| s.loading = false);
    }
}

/// Read side of a [`ContentStore`].
#[derive(Debug, Clone)]
pub struct StoreReader {
    rx: watch::Receiver<Snapshot>,
}

impl StoreReader {
    /// Copy of the latest state.
    pub fn snapshot(&self) -> Snapshot {
        self.rx.borrow().clone()
    }

    /// The latest result, if any.
    pub fn current(&self) -> Option<Arc<ContentResult>> {
        self.rx.borrow().current.clone()
    }

    /// Wait for the next change and return the new state.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
