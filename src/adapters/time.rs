//! Time adapters.
//!
//! - [`SystemClock`]: monotonic milliseconds from `std::time::Instant`.
//! - [`SoftRtc`]: a software RTC driven by any [`MonotonicClock`]. Like
//!   the DS3231-style part it stands in for, the time of day runs and wraps
//!   at midnight on its own; the date only moves when adjusted.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::app::ports::{MonotonicClock, RtcPort};
use crate::datemath::{CalendarDate, DateTime};

const SECS_PER_DAY: u64 = 86_400;

/// Monotonic time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl MonotonicClock for SystemClock {
    fn millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Software RTC over a monotonic clock.
pub struct SoftRtc<C: MonotonicClock> {
    clock: C,
    set_to: DateTime,
    set_at_ms: u64,
}

impl<C: MonotonicClock> SoftRtc<C> {
    pub fn new(clock: C, start: DateTime) -> Self {
        let set_at_ms = clock.millis();
        Self {
            clock,
            set_to: start,
            set_at_ms,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: MonotonicClock> RtcPort for SoftRtc<C> {
    fn now(&self) -> DateTime {
        let elapsed_secs = self.clock.millis().saturating_sub(self.set_at_ms) / 1000;
        self.set_to.add_seconds(elapsed_secs, false)
    }

    fn adjust(&mut self, to: DateTime) {
        self.set_to = to;
        self.set_at_ms = self.clock.millis();
    }
}

/// Current UTC wall-clock time from the host, for seeding a [`SoftRtc`].
pub fn utc_now() -> DateTime {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    from_unix_secs(secs)
}

fn from_unix_secs(secs: u64) -> DateTime {
    let mut date = CalendarDate {
        year: 1970,
        month: 1,
        day: 1,
    };
    for _ in 0..secs / SECS_PER_DAY {
        date = date.next_day();
    }
    DateTime::new(date, 0, 0, 0).add_seconds(secs % SECS_PER_DAY, false)
}
