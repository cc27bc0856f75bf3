//! Mock adapters for integration tests.
//!
//! Each mock records what the service did so tests can assert on the full
//! history without real EEPROM, RTC, or display hardware.

use std::cell::Cell;

use tzclock::app::events::ClockEvent;
use tzclock::app::ports::{DisplayPort, EventSink, MonotonicClock, RtcPort, StorageError, StoragePort};
use tzclock::app::state::DisplayFrame;
use tzclock::datemath::{CalendarDate, DateTime};
use tzclock::store::Field;

// ── Storage ───────────────────────────────────────────────────

pub struct MockStorage {
    pub bytes: Vec<u8>,
    pub writes: Vec<(usize, u8)>,
    pub fail_writes: bool,
    /// Successful writes allowed before writes start failing.
    pub write_budget: Option<usize>,
    /// The first write past the budget fails and the budget is lifted.
    pub transient: bool,
}

#[allow(dead_code)]
impl MockStorage {
    pub fn erased() -> Self {
        Self::filled(0xFF)
    }

    pub fn filled(byte: u8) -> Self {
        Self {
            bytes: vec![byte; 32],
            writes: Vec::new(),
            fail_writes: false,
            write_budget: None,
            transient: false,
        }
    }

    /// Every field already holds its default, so start-up writes nothing.
    pub fn initialised() -> Self {
        let mut storage = Self::erased();
        for field in Field::ALL {
            storage.bytes[field.addr()] = field.default_value();
        }
        storage
    }

    /// Let `n` more writes through, then fail.
    pub fn fail_after(&mut self, n: usize, transient: bool) {
        self.write_budget = Some(n);
        self.transient = transient;
    }
}

impl StoragePort for MockStorage {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, addr: usize) -> Result<u8, StorageError> {
        self.bytes.get(addr).copied().ok_or(StorageError::OutOfBounds(addr))
    }

    fn write(&mut self, addr: usize, value: u8) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        match self.write_budget {
            Some(0) => {
                if self.transient {
                    self.write_budget = None;
                }
                return Err(StorageError::IoError);
            }
            Some(n) => self.write_budget = Some(n - 1),
            None => {}
        }
        let slot = self.bytes.get_mut(addr).ok_or(StorageError::OutOfBounds(addr))?;
        *slot = value;
        self.writes.push((addr, value));
        Ok(())
    }
}

// ── RTC + monotonic clock ─────────────────────────────────────

/// RTC that only moves when a test adjusts it.
pub struct MockRtc {
    pub now: DateTime,
    pub adjustments: Vec<DateTime>,
}

#[allow(dead_code)]
impl MockRtc {
    pub fn at(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        Self {
            now: DateTime::new(CalendarDate::new(year, month, day).unwrap(), hour, minute, 0),
            adjustments: Vec::new(),
        }
    }

    pub fn set_time(&mut self, hour: u8, minute: u8) {
        self.now.hour = hour;
        self.now.minute = minute;
    }
}

impl RtcPort for MockRtc {
    fn now(&self) -> DateTime {
        self.now
    }

    fn adjust(&mut self, to: DateTime) {
        self.now = to;
        self.adjustments.push(to);
    }
}

#[derive(Default)]
pub struct MockClock {
    pub ms: Cell<u64>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn advance(&self, ms: u64) {
        self.ms.set(self.ms.get() + ms);
    }
}

impl MonotonicClock for MockClock {
    fn millis(&self) -> u64 {
        self.ms.get()
    }
}

// ── Display ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Brightness(u8),
    Show(DisplayFrame),
}

#[derive(Default)]
pub struct MockDisplay {
    pub calls: Vec<DisplayCall>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn brightness(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            DisplayCall::Brightness(b) => Some(*b),
            DisplayCall::Show(_) => None,
        })
    }

    pub fn frame(&self) -> Option<DisplayFrame> {
        self.calls.iter().rev().find_map(|c| match c {
            DisplayCall::Show(f) => Some(*f),
            DisplayCall::Brightness(_) => None,
        })
    }
}

impl DisplayPort for MockDisplay {
    fn set_brightness(&mut self, level: u8) {
        self.calls.push(DisplayCall::Brightness(level));
    }

    fn show(&mut self, frame: &DisplayFrame) {
        self.calls.push(DisplayCall::Show(*frame));
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ClockEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ClockEvent) {
        self.events.push(event.clone());
    }
}
