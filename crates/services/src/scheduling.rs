//! Cancellable background tasks for quiz timers.

use std::future::Future;

use tokio::task::{AbortHandle, JoinHandle};

/// Handle to a spawned timer task. Dropping the handle cancels the task.
///
/// Used for the repeating countdown and for the one-shot advance after an
/// answer, so that neither outlives the runner that owns it.
#[derive(Debug)]
#[must_use = "dropping a ScheduledTask cancels it"]
pub struct ScheduledTask {
    label: &'static str,
    abort: AbortHandle,
}

impl ScheduledTask {
    /// Spawn `future` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn spawn<F>(label: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle: JoinHandle<()> = tokio::spawn(future);
        Self {
            label,
            abort: handle.abort_handle(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }

    /// Cancel explicitly; equivalent to dropping the handle.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if !self.abort.is_finished() {
            tracing::trace!(task = self.label, "cancelling scheduled task");
            self.abort.abort();
        }
    }
}
