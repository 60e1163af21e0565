//! Time source used by every mutation that stamps a record.

use std::cell::Cell;
use std::rc::Rc;

use time::{Date, Duration, OffsetDateTime};

/// Source of "now".
pub trait Clock {
    fn now(&self) -> OffsetDateTime;

    /// Calendar date of [`Clock::now`].
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Wall clock, UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and hand
/// another to the code under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Rc<Cell<OffsetDateTime>>,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        ManualClock {
            instant: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, instant: OffsetDateTime) {
        self.instant.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.instant.set(self.instant.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        self.instant.get()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}
