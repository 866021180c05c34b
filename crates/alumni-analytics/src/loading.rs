//! Shared loading indicator
//!
//! Every dashboard on a page reports its fetches into one [`LoadingScope`].
//! Overlapping operations are counted, so the indicator only clears when the
//! last one finishes, and a guard keeps the count right even when a future is
//! dropped half-way.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;
use tracing::trace;

#[derive(Debug)]
struct Inner {
    active: AtomicUsize,
    tx: watch::Sender<bool>,
}

/// Counted loading flag with change notification
#[derive(Debug, Clone)]
pub struct LoadingScope {
    inner: Arc<Inner>,
}

impl Default for LoadingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingScope {
    /// Create an idle scope
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                active: AtomicUsize::new(0),
                tx,
            }),
        }
    }

    /// True while at least one operation is running
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.active() > 0
    }

    /// Operations currently running
    #[must_use]
    pub fn active(&self) -> usize {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Receiver that observes every idle/loading transition
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.tx.subscribe()
    }

    /// Mark an operation as running until the guard is dropped
    #[must_use = "the scope is released as soon as the guard is dropped"]
    pub fn enter(&self) -> LoadingGuard {
        if self.inner.active.fetch_add(1, Ordering::AcqRel) == 0 {
            trace!("Loading started");
            self.inner.tx.send_replace(true);
        }
        LoadingGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Run `future` with the scope marked as loading
    pub async fn with_loading<F: Future>(&self, future: F) -> F::Output {
        let _guard = self.enter();
        future.await
    }
}

/// Keeps a [`LoadingScope`] busy while alive
#[derive(Debug)]
pub struct LoadingGuard {
    inner: Arc<Inner>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if self.inner.active.fetch_sub(1, Ordering::AcqRel) == 1 {
            trace!("Loading finished");
            self.inner.tx.send_replace(false);
        }
    }
}
