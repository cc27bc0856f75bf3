//! Outbound application events.
//!
//! The [`ClockService`](super::service::ClockService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters decide what to
//! do with them.

use serde::Serialize;

use crate::datemath::{CalendarDate, DateTime};
use crate::dst::DstRule;
use crate::store::VersionStatus;

use super::state::ClockState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum ClockEvent {
    /// The service has started.
    Started { version: VersionStatus },

    /// DST activity changed for the observed date.
    DstChanged {
        date: CalendarDate,
        rule: DstRule,
        active: bool,
    },

    /// The schedule moved into or out of the dim window.
    DimChanged { dim: bool, brightness: u8 },

    /// The 24-hour timer moved the calendar forward.
    DateAdvanced { from: CalendarDate, to: CalendarDate },

    /// A command changed a persisted setting or the clock.
    SettingChanged { what: &'static str, persisted: bool },

    /// Point-in-time snapshot.
    Status(ClockStatus),
}

/// Serializable snapshot of the clock.
#[derive(Debug, Clone, Serialize)]
pub struct ClockStatus {
    pub now: DateTime,
    pub timezone: &'static str,
    pub state: ClockState,
    pub brightness: u8,
}
