//! Search input debouncing.

use std::time::Duration;

use tokio::time::Instant;

/// Holds the latest input until it has been quiet for `delay`.
///
/// There is a single slot: a new value replaces the pending one and restarts
/// the quiet period, so a burst of input yields only its last value.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    /// Replace the pending value and restart the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait until the pending value has been quiet for the full delay, then
    /// take it. Returns `None` immediately when nothing is pending.
    ///
    /// Cancel-safe: dropping the future leaves the pending value in place, so
    /// it can be used as a `tokio::select!` branch alongside the input source.
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.pending.as_ref()?.1;
        tokio::time::sleep_until(deadline).await;
        self.pending.take().map(|(value, _)| value)
    }

    /// Take the pending value without waiting, e.g. when input ends.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}
