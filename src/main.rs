//! Clock simulator: main entry point.
//!
//! Runs the clock core on the host with software stand-ins for the
//! hardware. Commands are read from stdin and responses go to stdout;
//! logs go to stderr.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  StdinTransport   SoftRtc      SystemClock    ConsoleDisplay │
//! │  (Transport)      (RtcPort)    (Monotonic)    (DisplayPort)  │
//! │  EepromAdapter    LogEventSink                               │
//! │  (StoragePort)    (EventSink)                                │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │   CommandEngine ──▶ ClockService (pure logic)          │  │
//! │  │                     DST · dim schedule · settings      │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `tzclock [EEPROM_IMAGE]`. Without a path the settings live in
//! memory only.

use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use tzclock::adapters::console::StdinTransport;
use tzclock::adapters::display::ConsoleDisplay;
use tzclock::adapters::eeprom::EepromAdapter;
use tzclock::adapters::log_sink::LogEventSink;
use tzclock::adapters::time::{SoftRtc, SystemClock, utc_now};
use tzclock::app::ports::MonotonicClock;
use tzclock::app::service::ClockService;
use tzclock::config::RuntimeConfig;
use tzclock::protocol::CommandEngine;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RuntimeConfig::default();

    let storage = match std::env::args_os().nth(1) {
        Some(path) => EepromAdapter::open(&path)
            .with_context(|| format!("opening EEPROM image {}", path.to_string_lossy()))?,
        None => EepromAdapter::new(),
    };

    let clock = SystemClock::new();
    let mut rtc = SoftRtc::new(clock, utc_now());
    let mut display = ConsoleDisplay::new();
    let mut sink = LogEventSink::new();
    let mut transport = StdinTransport::spawn().context("starting stdin reader")?;
    let mut engine = CommandEngine::new();

    let mut service = ClockService::new(storage, &config, rtc.clock().millis());
    service.start(&rtc, &mut display, &mut sink);
    info!("tzclock ready, poll every {} ms", config.poll_interval_ms);

    loop {
        let sent = engine
            .poll(&mut transport, |line| {
                service.handle_line(line, &mut rtc, &mut display, &mut sink)
            })
            .context("serial transport")?;

        service.tick(&mut rtc, &clock, &mut display, &mut sink);

        if sent.is_none() {
            if transport.is_closed() {
                info!("input closed, exiting");
                return Ok(());
            }
            std::thread::sleep(Duration::from_millis(config.poll_interval_ms));
        }
    }
}
