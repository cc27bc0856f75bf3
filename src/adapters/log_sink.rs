//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured clock events to the
//! `log` facade (stderr via `env_logger` on the host, UART on hardware).

use log::{info, warn};

use crate::app::events::ClockEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ClockEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ClockEvent) {
        match event {
            ClockEvent::Started { version } => {
                info!("START | rules={:?}", version);
            }
            ClockEvent::DstChanged { date, rule, active } => {
                info!("DST | {} rule={} active={}", date, rule.label(), active);
            }
            ClockEvent::DimChanged { dim, brightness } => {
                info!("DIM | dim={} brightness={}", dim, brightness);
            }
            ClockEvent::DateAdvanced { from, to } => {
                info!("DATE | advanced {} -> {} ({:?})", from, to, to.weekday());
            }
            ClockEvent::SettingChanged { what, persisted } => {
                info!("SET | {} persisted={}", what, persisted);
            }
            ClockEvent::Status(status) => match serde_json::to_string(status) {
                Ok(json) => info!("STATUS | {}", json),
                Err(e) => warn!("STATUS | serialise failed: {}", e),
            },
        }
    }
}
