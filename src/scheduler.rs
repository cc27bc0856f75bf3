//! Dim/bright schedule and the 24-hour date auto-advance timer.
//!
//! ```text
//!  00:00        bright_at              dim_at         24:00
//!    │ dim ░░░░░░░│       bright         │░░░░░░ dim   │
//! ```
//!
//! The dim window runs from `dim_at` (inclusive) to `bright_at`
//! (exclusive) and may wrap past midnight.

use crate::config::TimeOfDay;

/// Whether `hour:minute` falls inside the dim window.
///
/// Equal boundaries give an empty window.
pub fn is_in_dim_period(hour: u8, minute: u8, dim_at: TimeOfDay, bright_at: TimeOfDay) -> bool {
    let now = u16::from(hour) * 60 + u16::from(minute);
    let dim = dim_at.minutes_since_midnight();
    let bright = bright_at.minutes_since_midnight();

    if dim <= bright {
        // e.g. 08:00..18:00 (daytime dim)
        now >= dim && now < bright
    } else {
        // e.g. 22:00..07:00 (overnight dim, wraps midnight)
        now >= dim || now < bright
    }
}

// ═══════════════════════════════════════════════════════════════
//  Change detection
// ═══════════════════════════════════════════════════════════════

/// Remembers the last dim state it signalled.
#[derive(Debug, Default, Clone)]
pub struct DimTracker {
    last: Option<bool>,
}

impl DimTracker {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns `Some(dim)` when `dim` differs from the last signalled value.
    /// The first call always signals.
    pub fn update(&mut self, dim: bool) -> Option<bool> {
        if self.last == Some(dim) {
            return None;
        }
        self.last = Some(dim);
        Some(dim)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Day advance
// ═══════════════════════════════════════════════════════════════

/// Fires once per `interval_ms` of monotonic time.
#[derive(Debug, Clone)]
pub struct DayAdvanceTimer {
    last_mark_ms: u64,
    interval_ms: u64,
}

impl DayAdvanceTimer {
    pub fn new(now_ms: u64, interval_ms: u64) -> Self {
        Self {
            last_mark_ms: now_ms,
            interval_ms,
        }
    }

    /// True when at least `interval_ms` has elapsed since the last mark;
    /// the timer then re-arms at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms.wrapping_sub(self.last_mark_ms) >= self.interval_ms {
            self.last_mark_ms = now_ms;
            true
        } else {
            false
        }
    }
}
