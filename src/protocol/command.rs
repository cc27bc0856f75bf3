//! Command grammar and parser.
//!
//! | Line        | Command                         |
//! |-------------|---------------------------------|
//! | `Th,m,s`    | set time of day                 |
//! | `Dm,d,y`    | set date (2026–2035)            |
//! | `F0` / `F1` | 24h / 12h                       |
//! | `Zid`       | timezone table id               |
//! | `B0`..`B7`  | brightness                      |
//! | `S0` / `S1` | dim schedule off / on           |
//! | `Nh,m,b`    | dim window start + brightness   |
//! | `Yh,m,b`    | bright window start + brightness|
//! | `QF` `QS` `QB` `QZ` `QD` | queries            |
//!
//! Arguments are signed decimal integers separated by commas; whitespace
//! around a token is ignored. The leading letter is case-sensitive.

use core::fmt;
use core::ops::RangeInclusive;

use crate::config::{MAX_BRIGHTNESS, TimeFormat, TimeOfDay};
use crate::datemath::{CalendarDate, SUPPORTED_YEARS};
use crate::timezone;

/// Setter commands, by leading letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Time,
    Date,
    Format,
    Timezone,
    Brightness,
    Schedule,
    DimWindow,
    BrightWindow,
}

impl CommandKind {
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'T' => Self::Time,
            'D' => Self::Date,
            'F' => Self::Format,
            'Z' => Self::Timezone,
            'B' => Self::Brightness,
            'S' => Self::Schedule,
            'N' => Self::DimWindow,
            'Y' => Self::BrightWindow,
            _ => return None,
        })
    }

    pub fn letter(self) -> char {
        match self {
            Self::Time => 'T',
            Self::Date => 'D',
            Self::Format => 'F',
            Self::Timezone => 'Z',
            Self::Brightness => 'B',
            Self::Schedule => 'S',
            Self::DimWindow => 'N',
            Self::BrightWindow => 'Y',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// `QF`
    Format,
    /// `QS`
    Schedule,
    /// `QB`
    Brightness,
    /// `QZ`
    Timezone,
    /// `QD`
    DateTime,
}

impl Query {
    fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix.trim() {
            "F" => Self::Format,
            "S" => Self::Schedule,
            "B" => Self::Brightness,
            "Z" => Self::Timezone,
            "D" => Self::DateTime,
            _ => return None,
        })
    }
}

/// A parsed, range-checked command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetTime { hour: u8, minute: u8, second: u8 },
    SetDate(CalendarDate),
    SetFormat(TimeFormat),
    SetTimezone(u8),
    SetBrightness(u8),
    SetSchedule(bool),
    SetDimWindow { at: TimeOfDay, brightness: u8 },
    SetBrightWindow { at: TimeOfDay, brightness: u8 },
    Query(Query),
}

impl Command {
    /// The setter letter, or `None` for queries.
    pub fn kind(&self) -> Option<CommandKind> {
        Some(match self {
            Self::SetTime { .. } => CommandKind::Time,
            Self::SetDate(_) => CommandKind::Date,
            Self::SetFormat(_) => CommandKind::Format,
            Self::SetTimezone(_) => CommandKind::Timezone,
            Self::SetBrightness(_) => CommandKind::Brightness,
            Self::SetSchedule(_) => CommandKind::Schedule,
            Self::SetDimWindow { .. } => CommandKind::DimWindow,
            Self::SetBrightWindow { .. } => CommandKind::BrightWindow,
            Self::Query(_) => return None,
        })
    }
}

/// Why a line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Wrong argument count or a non-numeric argument.
    Malformed(CommandKind),
    /// Arguments parsed but violate their bounds.
    OutOfRange(CommandKind),
    /// Not a known command letter or query.
    Unknown,
}

impl ParseError {
    pub fn kind(self) -> Option<CommandKind> {
        match self {
            Self::Malformed(kind) | Self::OutOfRange(kind) => Some(kind),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(kind) => write!(f, "malformed {} command", kind.letter()),
            Self::OutOfRange(kind) => write!(f, "{} argument out of range", kind.letter()),
            Self::Unknown => write!(f, "unknown command"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Parser
// ───────────────────────────────────────────────────────────────

/// Parse one line (without its terminator).
pub fn parse(line: &str) -> Result<Command, ParseError> {
    if let Some(suffix) = line.strip_prefix('Q') {
        return Query::from_suffix(suffix)
            .map(Command::Query)
            .ok_or(ParseError::Unknown);
    }

    let mut chars = line.chars();
    let kind = chars
        .next()
        .and_then(CommandKind::from_letter)
        .ok_or(ParseError::Unknown)?;
    let args = chars.as_str();

    match kind {
        CommandKind::Time => {
            let [h, m, s] = tokenize(args, kind)?;
            Ok(Command::SetTime {
                hour: bounded(h, 0..=23, kind)?,
                minute: bounded(m, 0..=59, kind)?,
                second: bounded(s, 0..=59, kind)?,
            })
        }
        CommandKind::Date => {
            let [m, d, y] = tokenize(args, kind)?;
            let month = bounded(m, 1..=12, kind)?;
            let day = bounded(d, 1..=31, kind)?;
            let year = u16::try_from(y)
                .ok()
                .filter(|y| SUPPORTED_YEARS.contains(y))
                .ok_or(ParseError::OutOfRange(kind))?;
            CalendarDate::new(year, month, day)
                .map(Command::SetDate)
                .ok_or(ParseError::OutOfRange(kind))
        }
        CommandKind::Format => {
            let [flag] = tokenize(args, kind)?;
            TimeFormat::from_flag(bounded(flag, 0..=1, kind)?)
                .map(Command::SetFormat)
                .ok_or(ParseError::OutOfRange(kind))
        }
        CommandKind::Timezone => {
            let [id] = tokenize(args, kind)?;
            let id = bounded(id, 0..=timezone::max_id(), kind)?;
            timezone::lookup(id)
                .map(|entry| Command::SetTimezone(entry.id))
                .ok_or(ParseError::OutOfRange(kind))
        }
        CommandKind::Brightness => {
            let [level] = tokenize(args, kind)?;
            Ok(Command::SetBrightness(bounded(level, 0..=MAX_BRIGHTNESS, kind)?))
        }
        CommandKind::Schedule => {
            let [flag] = tokenize(args, kind)?;
            Ok(Command::SetSchedule(bounded(flag, 0..=1, kind)? == 1))
        }
        CommandKind::DimWindow | CommandKind::BrightWindow => {
            let [h, m, b] = tokenize(args, kind)?;
            let at = TimeOfDay::new(bounded(h, 0..=23, kind)?, bounded(m, 0..=59, kind)?)
                .ok_or(ParseError::OutOfRange(kind))?;
            let brightness = bounded(b, 0..=MAX_BRIGHTNESS, kind)?;
            Ok(if kind == CommandKind::DimWindow {
                Command::SetDimWindow { at, brightness }
            } else {
                Command::SetBrightWindow { at, brightness }
            })
        }
    }
}

/// Parse raw line bytes.
///
/// A line that is not UTF-8 but starts with a setter letter is malformed for
/// that setter; anything else undecodable is unknown.
pub fn parse_bytes(line: &[u8]) -> Result<Command, ParseError> {
    match core::str::from_utf8(line) {
        Ok(text) => parse(text),
        Err(_) => Err(line
            .first()
            .and_then(|&b| CommandKind::from_letter(char::from(b)))
            .map_or(ParseError::Unknown, ParseError::Malformed)),
    }
}

/// Split `args` into exactly `N` comma-separated integers.
fn tokenize<const N: usize>(args: &str, kind: CommandKind) -> Result<[i32; N], ParseError> {
    let mut values = [0i32; N];
    let mut tokens = args.split(',');
    for slot in &mut values {
        let token = tokens.next().ok_or(ParseError::Malformed(kind))?;
        *slot = token
            .trim()
            .parse::<i32>()
            .map_err(|_| ParseError::Malformed(kind))?;
    }
    if tokens.next().is_some() {
        return Err(ParseError::Malformed(kind));
    }
    Ok(values)
}

fn bounded(value: i32, range: RangeInclusive<u8>, kind: CommandKind) -> Result<u8, ParseError> {
    u8::try_from(value)
        .ok()
        .filter(|v| range.contains(v))
        .ok_or(ParseError::OutOfRange(kind))
}
