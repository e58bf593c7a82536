//! Deadline-based debouncer: cancel-and-reschedule without a timer thread.
//!
//! The host owns the clock. Each `schedule` replaces whatever was pending and
//! pushes the deadline out to `now + window`; `poll` hands the value back once
//! the deadline has passed. Only the last value of a burst ever fires.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Coalesces a burst of calls into the last one, fired after a quiet window.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    /// The quiescence window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value`, cancelling any pending one. Returns true if a pending
    /// value was replaced.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let deadline = now.checked_add(self.window).unwrap_or(now);
        self.pending.replace(Pending { value, deadline }).is_some()
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| p.deadline <= now) {
            return self.take();
        }
        None
    }

    /// Take the pending value regardless of its deadline.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}
