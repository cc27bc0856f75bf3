//! Clock state owned by the service.

use core::fmt;

use serde::Serialize;

use crate::config::{Settings, TimeFormat};
use crate::datemath::format_12_hour;

/// Values derived from settings and the current date/time. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeState {
    pub dst_active: bool,
    pub currently_dim: bool,
}

/// Everything the service knows, in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockState {
    pub settings: Settings,
    pub runtime: RuntimeState,
}

impl ClockState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            runtime: RuntimeState::default(),
        }
    }

    /// Brightness the display should run at right now.
    pub fn effective_brightness(&self) -> u8 {
        let schedule = &self.settings.schedule;
        match (schedule.enabled, self.runtime.currently_dim) {
            (false, _) => self.settings.brightness,
            (true, true) => schedule.dim_brightness,
            (true, false) => schedule.bright_brightness,
        }
    }

    /// Shift an RTC hour (local standard time) by the active DST offset.
    pub fn local_hour(&self, rtc_hour: u8) -> u8 {
        (rtc_hour + u8::from(self.runtime.dst_active)) % 24
    }

    pub fn frame(&self, local_hour: u8, minute: u8) -> DisplayFrame {
        DisplayFrame::new(self.settings.time_format, local_hour, minute)
    }
}

// ───────────────────────────────────────────────────────────────
// Display frame
// ───────────────────────────────────────────────────────────────

/// What the 4-digit display should show: `HHMM` as a number.
///
/// In 12-hour mode the hour digit has no leading zero (` 7:05`); in 24-hour
/// mode it does (`07:05`). The colon is always lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayFrame {
    pub number: u16,
    pub leading_zero: bool,
    pub colon: bool,
}

impl DisplayFrame {
    pub fn new(format: TimeFormat, hour24: u8, minute: u8) -> Self {
        let hour = match format {
            TimeFormat::H24 => hour24,
            TimeFormat::H12 => format_12_hour(hour24),
        };
        Self {
            number: u16::from(hour) * 100 + u16::from(minute),
            leading_zero: format == TimeFormat::H24,
            colon: true,
        }
    }
}

impl fmt::Display for DisplayFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute) = (self.number / 100, self.number % 100);
        let sep = if self.colon { ':' } else { ' ' };
        if self.leading_zero {
            write!(f, "{:02}{}{:02}", hour, sep, minute)
        } else {
            write!(f, "{:>2}{}{:02}", hour, sep, minute)
        }
    }
}
