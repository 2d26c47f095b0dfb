//! Trailing-edge debounce on the tokio runtime.
//!
//! Every [`Debouncer::call`] aborts the pending timer task (if any) and spawns
//! a new one, so `action` only runs once the caller has been quiet for `wait`,
//! and only with the last value it was given.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Wrapper returned by [`debounce`].
pub struct Debouncer<T> {
    wait: Duration,
    action: Arc<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Wrap `action` so bursts of calls within `wait` collapse into one trailing call.
///
/// Must be called (via [`Debouncer::call`]) from inside a tokio runtime.
pub fn debounce<T, F>(action: F, wait: Duration) -> Debouncer<T>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Debouncer {
        wait,
        action: Arc::new(action),
        pending: Mutex::new(None),
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Schedule `action(value)` after `wait`, replacing any pending call.
    pub fn call(&self, value: T) {
        let action = Arc::clone(&self.action);
        let wait = self.wait;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            action(value);
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(prev) = pending.replace(handle) {
            prev.abort();
        }
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(prev) = pending.take() {
            prev.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(prev) = pending.take() {
            prev.abort();
        }
    }
}
