//! Calendar arithmetic for the proleptic Gregorian calendar.
//!
//! Pure functions only: day-of-week via Zeller's congruence, "Nth Sunday of
//! month" resolution, leap years, and the day rollover used by the 24-hour
//! date auto-advance.

use core::fmt;
use core::ops::RangeInclusive;

use serde::Serialize;

/// First year accepted by the `D` command.
pub const MIN_YEAR: u16 = 2026;
/// Last year accepted by the `D` command.
pub const MAX_YEAR: u16 = 2035;
/// Years the clock can be set to.
pub const SUPPORTED_YEARS: RangeInclusive<u16> = MIN_YEAR..=MAX_YEAR;

const DAYS_PER_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const SECS_PER_DAY: u32 = 86_400;

// ───────────────────────────────────────────────────────────────
// Weekday
// ───────────────────────────────────────────────────────────────

/// Day of the week, numbered 0 = Sunday … 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// Map an index in `0..7` (0 = Sunday) to a weekday. Wraps modulo 7.
    pub fn from_index(index: u8) -> Self {
        match index % 7 {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            _ => Self::Saturday,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

// ───────────────────────────────────────────────────────────────
// Free functions
// ───────────────────────────────────────────────────────────────

/// Divisible by 4 and not by 100, or divisible by 400.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1–12). Returns 0 for an invalid month.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_PER_MONTH[usize::from(month - 1)],
        _ => 0,
    }
}

/// Zeller's congruence.
///
/// January and February are treated as months 13 and 14 of the previous
/// year. The raw congruence yields 0 = Saturday, 1 = Sunday, …; the result
/// is remapped so that 0 = Sunday.
///
/// `month` must be 1–12; callers validate before calling.
pub fn day_of_week(year: u16, month: u8, day: u8) -> Weekday {
    let (mut y, mut m) = (i32::from(year), i32::from(month));
    if m < 3 {
        m += 12;
        y -= 1;
    }
    let q = i32::from(day);
    let k = y % 100;
    let j = y / 100;
    let h = (q + (13 * (m + 1)) / 5 + k + k / 4 + j / 4 - 2 * j).rem_euclid(7);
    Weekday::from_index(((h + 6) % 7) as u8)
}

/// Which Sunday of a month a DST boundary falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    Second,
    Third,
    Last,
}

/// Day-of-month of the given Sunday occurrence.
///
/// ```text
///   first  = 1 + (7 - dow(day 1)) mod 7
///   Nth    = first + (N - 1) * 7
///   last   = last_day - dow(last_day)
/// ```
pub fn nth_sunday(year: u16, month: u8, occurrence: Occurrence) -> u8 {
    let nth = |n: u8| {
        let dow = day_of_week(year, month, 1).index();
        1 + (7 - dow) % 7 + (n - 1) * 7
    };
    match occurrence {
        Occurrence::First => nth(1),
        Occurrence::Second => nth(2),
        Occurrence::Third => nth(3),
        Occurrence::Last => {
            let last = days_in_month(year, month);
            last - day_of_week(year, month, last).index()
        }
    }
}

/// Convert a 24-hour clock hour to the 12-hour dial (0 → 12, 13 → 1).
pub fn format_12_hour(hour24: u8) -> u8 {
    match hour24 {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    }
}

// ───────────────────────────────────────────────────────────────
// CalendarDate
// ───────────────────────────────────────────────────────────────

/// A validated Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    /// Build a date, checking the month and the month's real length.
    ///
    /// The year is not range-checked here; the command layer restricts it
    /// to [`SUPPORTED_YEARS`].
    pub fn new(year: u16, month: u8, day: u8) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn weekday(self) -> Weekday {
        day_of_week(self.year, self.month, self.day)
    }

    /// The following calendar day, carrying into month and year.
    pub fn next_day(self) -> Self {
        if self.day < days_in_month(self.year, self.month) {
            Self {
                day: self.day + 1,
                ..self
            }
        } else if self.month < 12 {
            Self {
                month: self.month + 1,
                day: 1,
                ..self
            }
        } else {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
                day: 1,
            }
        }
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self {
            year: MIN_YEAR,
            month: 1,
            day: 1,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}

// ───────────────────────────────────────────────────────────────
// DateTime
// ───────────────────────────────────────────────────────────────

/// Wall-clock reading as kept by the RTC (local standard time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateTime {
    pub date: CalendarDate,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    pub fn new(date: CalendarDate, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
        }
    }

    pub fn seconds_of_day(&self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }

    /// Advance the time of day by `secs`.
    ///
    /// With `carry_date` the date rolls over at midnight; without it only
    /// the time of day wraps and the date is left as is.
    pub fn add_seconds(self, secs: u64, carry_date: bool) -> Self {
        let total = u64::from(self.seconds_of_day()) + secs;
        let days = total / u64::from(SECS_PER_DAY);
        let tod = (total % u64::from(SECS_PER_DAY)) as u32;

        let mut date = self.date;
        if carry_date {
            for _ in 0..days {
                date = date.next_day();
            }
        }
        Self {
            date,
            hour: (tod / 3600) as u8,
            minute: (tod / 60 % 60) as u8,
            second: (tod % 60) as u8,
        }
    }
}
