//! Time source for debouncing and drag thresholds.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shared monotonic clock.
///
/// Clones share the same underlying time, so a test can advance one handle and every holder
/// observes it.
#[derive(Debug, Clone)]
pub struct Clock {
    inner: Rc<ClockInner>,
}

#[derive(Debug)]
enum ClockInner {
    /// Real time since the clock was created.
    Monotonic(Instant),
    /// Time that only moves when told to.
    Manual(Cell<Duration>),
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            inner: Rc::new(ClockInner::Monotonic(Instant::now())),
        }
    }
}

impl Clock {
    /// Creates a manually driven clock starting at `time`.
    pub fn with_time(time: Duration) -> Self {
        Self {
            inner: Rc::new(ClockInner::Manual(Cell::new(time))),
        }
    }

    pub fn now(&self) -> Duration {
        match &*self.inner {
            ClockInner::Monotonic(start) => start.elapsed(),
            ClockInner::Manual(time) => time.get(),
        }
    }

    /// Moves a manual clock forward. Does nothing for a monotonic clock.
    pub fn advance(&self, by: Duration) {
        if let ClockInner::Manual(time) = &*self.inner {
            time.set(time.get() + by);
        }
    }
}
