//! Regional daylight-saving predicates.
//!
//! Every rule has the same shape:
//!
//! ```text
//!   start month        always-active months        end month
//!   day >= boundary  ──────────────────────────▶  day < boundary
//! ```
//!
//! Southern-hemisphere windows cross the December/January boundary, so
//! the always-active span is `month > start || month < end`.

use serde::Serialize;

use crate::datemath::{CalendarDate, Occurrence, nth_sunday};

/// A DST window: inclusive start boundary, exclusive end boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    start_month: u8,
    start: Occurrence,
    end_month: u8,
    end: Occurrence,
}

impl Window {
    fn contains(&self, year: u16, month: u8, day: u8) -> bool {
        if month == self.start_month {
            return day >= nth_sunday(year, month, self.start);
        }
        if month == self.end_month {
            return day < nth_sunday(year, month, self.end);
        }
        if self.start_month < self.end_month {
            month > self.start_month && month < self.end_month
        } else {
            month > self.start_month || month < self.end_month
        }
    }
}

const USA_CANADA: Window = Window {
    start_month: 3,
    start: Occurrence::Second,
    end_month: 11,
    end: Occurrence::First,
};

const UK_EU: Window = Window {
    start_month: 3,
    start: Occurrence::Last,
    end_month: 10,
    end: Occurrence::Last,
};

const AUSTRALIA: Window = Window {
    start_month: 10,
    start: Occurrence::First,
    end_month: 4,
    end: Occurrence::First,
};

const NEW_ZEALAND: Window = Window {
    start_month: 9,
    start: Occurrence::Last,
    end_month: 4,
    end: Occurrence::First,
};

const BRAZIL: Window = Window {
    start_month: 10,
    start: Occurrence::Third,
    end_month: 2,
    end: Occurrence::Third,
};

/// 2nd Sunday of March to 1st Sunday of November.
pub fn is_dst_usa_canada(year: u16, month: u8, day: u8) -> bool {
    USA_CANADA.contains(year, month, day)
}

/// Last Sunday of March to last Sunday of October.
pub fn is_dst_uk_eu(year: u16, month: u8, day: u8) -> bool {
    UK_EU.contains(year, month, day)
}

/// 1st Sunday of October to 1st Sunday of April.
pub fn is_dst_australia(year: u16, month: u8, day: u8) -> bool {
    AUSTRALIA.contains(year, month, day)
}

/// Last Sunday of September to 1st Sunday of April.
pub fn is_dst_new_zealand(year: u16, month: u8, day: u8) -> bool {
    NEW_ZEALAND.contains(year, month, day)
}

/// 3rd Sunday of October to 3rd Sunday of February.
pub fn is_dst_brazil(year: u16, month: u8, day: u8) -> bool {
    BRAZIL.contains(year, month, day)
}

// ───────────────────────────────────────────────────────────────
// Rule selector
// ───────────────────────────────────────────────────────────────

/// Which regional rule a timezone follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DstRule {
    #[default]
    None,
    UsaCanada,
    UkEu,
    Australia,
    NewZealand,
    Brazil,
}

impl DstRule {
    /// Whether DST is in effect for the whole of `date`.
    pub fn is_active(self, date: CalendarDate) -> bool {
        let CalendarDate { year, month, day } = date;
        match self {
            Self::None => false,
            Self::UsaCanada => is_dst_usa_canada(year, month, day),
            Self::UkEu => is_dst_uk_eu(year, month, day),
            Self::Australia => is_dst_australia(year, month, day),
            Self::NewZealand => is_dst_new_zealand(year, month, day),
            Self::Brazil => is_dst_brazil(year, month, day),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::UsaCanada => "usa-canada",
            Self::UkEu => "uk-eu",
            Self::Australia => "australia",
            Self::NewZealand => "new-zealand",
            Self::Brazil => "brazil",
        }
    }
}
