//! Quiet-period commit
//!
//! A value pushed into a [`DebouncedCommit`] is delivered to its callback
//! only once no newer value has arrived for the configured delay. The timer
//! lives in a tokio task fed by an unbounded mailbox, so pushing never
//! blocks the caller.

use std::fmt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, sleep_until};
use tracing::{debug, trace};

enum Message<T> {
    Value(T),
    Cancel,
}

/// Callback receiving committed values
pub type CommitFn<T> = Box<dyn Fn(T) + Send + Sync>;

/// Delivers the last pushed value after a quiet period
///
/// Must be created inside a tokio runtime. Dropping the handle discards any
/// pending value.
pub struct DebouncedCommit<T> {
    mailbox: mpsc::UnboundedSender<Message<T>>,
    task: JoinHandle<()>,
    delay: Duration,
}

impl<T: Send + 'static> DebouncedCommit<T> {
    /// Start the timer task
    pub fn new(delay: Duration, on_commit: impl Fn(T) + Send + Sync + 'static) -> Self {
        let (mailbox, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(rx, delay, Box::new(on_commit)));
        Self {
            mailbox,
            task,
            delay,
        }
    }

    /// Replace the pending value and restart the quiet period
    pub fn push(&self, value: T) {
        if self.mailbox.send(Message::Value(value)).is_err() {
            debug!("Debounce task has stopped, dropping value");
        }
    }

    /// Drop the pending value, if any
    pub fn cancel(&self) {
        if self.mailbox.send(Message::Cancel).is_err() {
            debug!("Debounce task has stopped, nothing to cancel");
        }
    }

    /// Quiet period
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for DebouncedCommit<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<T> fmt::Debug for DebouncedCommit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncedCommit")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

async fn run<T>(mut rx: mpsc::UnboundedReceiver<Message<T>>, delay: Duration, on_commit: CommitFn<T>) {
    let mut pending: Option<(T, Instant)> = None;

    loop {
        let deadline = pending.as_ref().map(|(_, at)| *at);
        tokio::select! {
            message = rx.recv() => match message {
                Some(Message::Value(value)) => {
                    trace!("Debounce timer restarted");
                    pending = Some((value, Instant::now() + delay));
                }
                Some(Message::Cancel) => {
                    if pending.take().is_some() {
                        debug!("Pending commit cancelled");
                    }
                }
                None => break,
            },
            () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some((value, _)) = pending.take() {
                    on_commit(value);
                }
            }
        }
    }
}
