//! Wire responses.
//!
//! [`Response`]'s `Display` is the exact text sent back, without the line
//! terminator; [`CommandEngine`](super::engine::CommandEngine) appends CRLF.

use core::fmt::{self, Write as _};

use heapless::String;

use crate::config::{LINE_CAPACITY, ScheduleSettings, TimeFormat, TimeOfDay};
use crate::datemath::{CalendarDate, DateTime};
use crate::timezone::{self, TimezoneEntry};

use super::command::CommandKind;

/// Line terminator for every response.
pub const TERMINATOR: &str = "\r\n";

/// Room for a full line with every byte escaped as `\xNN`.
pub const ECHO_CAPACITY: usize = LINE_CAPACITY * 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Time { hour: u8, minute: u8, second: u8 },
    Date(CalendarDate),
    /// Carries the format as read back from the store.
    Format(TimeFormat),
    Timezone(u8),
    Brightness(u8),
    Schedule(bool),
    DimWindow { at: TimeOfDay, brightness: u8 },
    BrightWindow { at: TimeOfDay, brightness: u8 },

    QueryFormat(TimeFormat),
    QuerySchedule { schedule: ScheduleSettings, dim_now: bool },
    QueryBrightness(u8),
    QueryTimezone { entry: &'static TimezoneEntry, dst_active: bool },
    QueryDateTime { now: DateTime, dst_active: bool },

    /// Malformed or out-of-range arguments.
    Rejected(CommandKind),
    /// The store refused the write.
    StorageFailed(CommandKind),
    /// Unrecognised line, echoed back. Bytes that are not UTF-8 appear as
    /// `\xNN`.
    Unknown(String<ECHO_CAPACITY>),
    /// Line longer than [`LINE_CAPACITY`].
    Overflow,
}

impl Response {
    /// Build an [`Response::Unknown`] echo from raw line bytes.
    ///
    /// Lines come from the decoder and never exceed [`LINE_CAPACITY`], so the
    /// echo is complete; anything longer is cut at [`ECHO_CAPACITY`] bytes.
    pub fn unknown(line: &[u8]) -> Self {
        let mut echo = String::new();
        'fill: for chunk in line.utf8_chunks() {
            for ch in chunk.valid().chars() {
                if echo.push(ch).is_err() {
                    break 'fill;
                }
            }
            for byte in chunk.invalid() {
                let mut escaped: String<4> = String::new();
                let _ = write!(escaped, "\\x{:02X}", byte);
                if echo.push_str(&escaped).is_err() {
                    break 'fill;
                }
            }
        }
        Self::Unknown(echo)
    }

    pub fn is_ok(&self) -> bool {
        !matches!(
            self,
            Self::Rejected(_) | Self::StorageFailed(_) | Self::Unknown(_) | Self::Overflow
        )
    }
}

/// Argument hint printed after `ERR:<letter> expected `.
struct Expected(CommandKind);

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            CommandKind::Time => write!(f, "h,m,s"),
            CommandKind::Date => write!(f, "m,d,y"),
            CommandKind::Format | CommandKind::Schedule => write!(f, "0 or 1"),
            CommandKind::Timezone => write!(f, "0..{}", timezone::max_id()),
            CommandKind::Brightness => write!(f, "0..7"),
            CommandKind::DimWindow | CommandKind::BrightWindow => write!(f, "h,m,b"),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time {
                hour,
                minute,
                second,
            } => write!(f, "OK:T{}:{}:{}", hour, minute, second),
            Self::Date(date) => write!(f, "OK:D{}", date),
            Self::Format(format) => write!(f, "OK:F{}", format.flag()),
            Self::Timezone(id) => write!(f, "OK:Z{}", id),
            Self::Brightness(level) => write!(f, "OK:B{}", level),
            Self::Schedule(enabled) => write!(f, "OK:S{}", u8::from(*enabled)),
            Self::DimWindow { at, brightness } => {
                write!(f, "OK:N{}:{}:{}", at.hour, at.minute, brightness)
            }
            Self::BrightWindow { at, brightness } => {
                write!(f, "OK:Y{}:{}:{}", at.hour, at.minute, brightness)
            }

            Self::QueryFormat(format) => write!(f, "OK:QF{}", format.flag()),
            Self::QuerySchedule { schedule: s, dim_now } => write!(
                f,
                "OK:QS{},{}:{}:{},{}:{}:{},{}",
                u8::from(s.enabled),
                s.dim_at.hour,
                s.dim_at.minute,
                s.dim_brightness,
                s.bright_at.hour,
                s.bright_at.minute,
                s.bright_brightness,
                u8::from(*dim_now),
            ),
            Self::QueryBrightness(level) => write!(f, "OK:QB{}", level),
            Self::QueryTimezone { entry, dst_active } => write!(
                f,
                "OK:QZ{},{},{},{}",
                entry.id,
                entry.utc_offset_hours,
                entry.name,
                u8::from(*dst_active)
            ),
            Self::QueryDateTime { now, dst_active } => write!(
                f,
                "OK:QD{},{}:{}:{},{}",
                now.date,
                now.hour,
                now.minute,
                now.second,
                u8::from(*dst_active)
            ),

            Self::Rejected(kind) => write!(f, "ERR:{} expected {}", kind.letter(), Expected(*kind)),
            Self::StorageFailed(kind) => write!(f, "ERR:{} storage", kind.letter()),
            Self::Unknown(line) => write!(f, "ERR:UNKNOWN {}", line),
            Self::Overflow => write!(f, "ERR:RX overflow"),
        }
    }
}
