//! Settings types and runtime configuration.
//!
//! [`Settings`] is the persisted user state (one byte per field in the
//! store, see [`crate::store`]). [`RuntimeConfig`] holds the polling loop's
//! timing and is not persisted.

use serde::{Deserialize, Serialize};

use crate::timezone::DEFAULT_TIMEZONE_ID;

/// Tag stamped into the store; bump when the DST rule table changes.
pub const RULES_VERSION: u8 = 2;

/// Longest accepted command line, in bytes, excluding the terminator.
pub const LINE_CAPACITY: usize = 64;

/// Highest display brightness level.
pub const MAX_BRIGHTNESS: u8 = 7;

// ── Time format ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TimeFormat {
    #[default]
    H24 = 0,
    H12 = 1,
}

impl TimeFormat {
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::H24),
            1 => Some(Self::H12),
            _ => None,
        }
    }

    pub fn flag(self) -> u8 {
        self as u8
    }
}

// ── Time of day ───────────────────────────────────────────────

/// Hour and minute, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// For bytes the caller has already range-checked.
    pub(crate) const fn from_checked(hour: u8, minute: u8) -> Self {
        debug_assert!(hour < 24 && minute < 60);
        Self { hour, minute }
    }

    pub fn minutes_since_midnight(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

// ── Schedule ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    pub enabled: bool,
    /// Start of the dim (night) window.
    pub dim_at: TimeOfDay,
    /// Start of the bright (day) window; the dim window ends here.
    pub bright_at: TimeOfDay,
    pub dim_brightness: u8,
    pub bright_brightness: u8,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            dim_at: TimeOfDay { hour: 22, minute: 0 },
            bright_at: TimeOfDay { hour: 7, minute: 0 },
            dim_brightness: 1,
            bright_brightness: 5,
        }
    }
}

// ── Persisted settings ────────────────────────────────────────

/// Every persisted field, always in range once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub brightness: u8,
    pub time_format: TimeFormat,
    pub timezone_id: u8,
    pub rules_version: u8,
    pub schedule: ScheduleSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brightness: 5,
            time_format: TimeFormat::H24,
            timezone_id: DEFAULT_TIMEZONE_ID,
            rules_version: RULES_VERSION,
            schedule: ScheduleSettings::default(),
        }
    }
}

// ── Runtime configuration ─────────────────────────────────────

/// Main-loop timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Sleep between loop iterations.
    pub poll_interval_ms: u64,
    /// Elapsed monotonic time that advances the calendar date by one day.
    pub day_advance_interval_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            day_advance_interval_ms: 86_400_000,
        }
    }
}
