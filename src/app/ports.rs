//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ClockService (domain)
//! ```
//!
//! Driven adapters (RTC, monotonic timer, display, settings storage, event
//! sinks) implement these traits. The
//! [`ClockService`](super::service::ClockService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::datemath::DateTime;

use super::events::ClockEvent;
use super::state::DisplayFrame;

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ EEPROM)
// ───────────────────────────────────────────────────────────────

/// Byte-addressed durable storage with limited write endurance.
///
/// Callers are expected to skip writes that would not change the stored
/// byte; implementations do not need to deduplicate.
pub trait StoragePort {
    /// Number of addressable bytes.
    fn capacity(&self) -> usize;

    fn read(&self, addr: usize) -> Result<u8, StorageError>;

    fn write(&mut self, addr: usize, value: u8) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Time ports (driven adapters: hardware clocks → domain)
// ───────────────────────────────────────────────────────────────

/// Battery-backed real-time clock holding local standard time.
///
/// The time of day advances on its own and wraps at midnight. The date
/// does not roll over by itself; the service advances it.
pub trait RtcPort {
    fn now(&self) -> DateTime;

    fn adjust(&mut self, to: DateTime);
}

/// Free-running millisecond counter since boot.
pub trait MonotonicClock {
    fn millis(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → 4-digit display)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Brightness level 0–7.
    fn set_brightness(&mut self, level: u8);

    fn show(&mut self, frame: &DisplayFrame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`ClockEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &ClockEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from settings validation and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A value failed range validation.
    /// The `&'static str` names the field.
    ValidationFailed(&'static str),
    /// The backing store rejected a read or write.
    Storage(StorageError),
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Address beyond [`StoragePort::capacity`].
    OutOfBounds(usize),
    /// Generic I/O error from the backing medium.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(field) => write!(f, "validation failed: {}", field),
            Self::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds(addr) => write!(f, "address 0x{:02X} out of bounds", addr),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}
