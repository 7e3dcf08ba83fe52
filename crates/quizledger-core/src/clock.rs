//! Wall-clock time sources.

use std::cell::Cell;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};

/// Source of the current time.
///
/// The time zone matters: week buckets are computed on the local calendar of
/// the returned timestamp.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// The system clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    type Tz = Utc;

    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
