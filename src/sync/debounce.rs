use std::time::Duration;

use crate::utils::Clock;

/// Trailing-edge debounce.
///
/// Every [`call`](Debouncer::call) replaces the pending value and pushes the deadline back by the
/// window. The value comes out of [`poll`](Debouncer::poll) once the window passes without
/// another call. Intermediate values are dropped, not queued.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    clock: Clock,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    deadline: Duration,
    value: T,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration, clock: Clock) -> Self {
        Self {
            window,
            clock,
            pending: None,
        }
    }

    pub fn call(&mut self, value: T) {
        self.pending = Some(Pending {
            deadline: self.clock.now() + self.window,
            value,
        });
    }

    /// Takes the pending value if its window has passed.
    pub fn poll(&mut self) -> Option<T> {
        let now = self.clock.now();
        match &self.pending {
            Some(pending) if pending.deadline <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Takes the pending value right away.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
