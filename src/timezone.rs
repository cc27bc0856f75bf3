//! Static timezone table.
//!
//! Offsets are whole hours of local standard time. The table is ordered by
//! id and never changes at runtime.

use serde::Serialize;

use crate::dst::DstRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimezoneEntry {
    pub id: u8,
    pub utc_offset_hours: i8,
    pub name: &'static str,
    pub dst_rule: DstRule,
}

const fn tz(id: u8, utc_offset_hours: i8, name: &'static str, dst_rule: DstRule) -> TimezoneEntry {
    TimezoneEntry {
        id,
        utc_offset_hours,
        name,
        dst_rule,
    }
}

pub static TIMEZONES: [TimezoneEntry; 21] = [
    tz(0, 0, "UTC", DstRule::None),
    tz(1, 0, "London", DstRule::UkEu),
    tz(2, 1, "Paris/Berlin", DstRule::UkEu),
    tz(3, 2, "Athens", DstRule::UkEu),
    tz(4, 3, "Moscow", DstRule::None),
    tz(5, 4, "Dubai", DstRule::None),
    tz(6, 5, "Karachi", DstRule::None),
    tz(7, 6, "Dhaka", DstRule::None),
    tz(8, 7, "Bangkok", DstRule::None),
    tz(9, 8, "Singapore", DstRule::None),
    tz(10, 9, "Tokyo", DstRule::None),
    tz(11, 10, "Sydney", DstRule::Australia),
    tz(12, 12, "Auckland", DstRule::NewZealand),
    tz(13, -10, "Honolulu", DstRule::None),
    tz(14, -9, "Anchorage", DstRule::UsaCanada),
    tz(15, -8, "Los Angeles", DstRule::UsaCanada),
    tz(16, -7, "Denver", DstRule::UsaCanada),
    tz(17, -7, "Phoenix", DstRule::None),
    tz(18, -6, "Chicago", DstRule::UsaCanada),
    tz(19, -5, "New York", DstRule::UsaCanada),
    tz(20, -3, "Sao Paulo", DstRule::Brazil),
];

/// Id 0, UTC.
pub const DEFAULT_TIMEZONE_ID: u8 = 0;

pub fn lookup(id: u8) -> Option<&'static TimezoneEntry> {
    TIMEZONES.iter().find(|entry| entry.id == id)
}

/// Rule for `id`, or [`DstRule::None`] when the id is unknown.
pub fn dst_rule_for(id: u8) -> DstRule {
    lookup(id).map_or(DstRule::None, |entry| entry.dst_rule)
}

/// Highest id in the table.
pub fn max_id() -> u8 {
    TIMEZONES.iter().map(|entry| entry.id).max().unwrap_or(0)
}
