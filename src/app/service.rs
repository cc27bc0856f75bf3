//! Application service: the hexagonal core.
//!
//! [`ClockService`] owns the settings store and all derived clock state.
//! It exposes a hardware-agnostic API. All I/O flows through port traits
//! injected at call sites, making the whole service testable with mock
//! adapters.
//!
//! ```text
//!  RtcPort ─────────▶ ┌────────────────────────┐ ──▶ DisplayPort
//!  MonotonicClock ──▶ │      ClockService      │ ──▶ EventSink
//!  Command ─────────▶ │  DST · dim · settings  │ ──▶ Response
//!                     └───────────┬────────────┘
//!                                 ▼
//!                        ConfigStore<StoragePort>
//! ```

use log::{debug, info, warn};

use crate::config::{RuntimeConfig, TimeFormat};
use crate::datemath::{CalendarDate, DateTime, format_12_hour};
use crate::error::{Error, Result};
use crate::protocol::{Command, CommandKind, ParseError, Query, Response, parse_bytes};
use crate::scheduler::{DayAdvanceTimer, DimTracker, is_in_dim_period};
use crate::store::{ConfigStore, Field, VersionStatus};
use crate::timezone::{self, TIMEZONES};

use super::events::{ClockEvent, ClockStatus};
use super::ports::{DisplayPort, EventSink, MonotonicClock, RtcPort, StoragePort};
use super::state::{ClockState, DisplayFrame};

// ───────────────────────────────────────────────────────────────
// ClockService
// ───────────────────────────────────────────────────────────────

pub struct ClockService<S: StoragePort> {
    store: ConfigStore<S>,
    state: ClockState,
    version: VersionStatus,
    dim: DimTracker,
    day_timer: DayAdvanceTimer,
    /// Date DST was last evaluated for.
    observed_date: Option<CalendarDate>,
    /// Displayed (hour, minute) dim was last evaluated for.
    observed_minute: Option<(u8, u8)>,
    shown_frame: Option<DisplayFrame>,
    shown_brightness: Option<u8>,
}

impl<S: StoragePort> ClockService<S> {
    /// Check the stored rules version and load settings.
    ///
    /// Does not touch the display; call [`start`](Self::start) next.
    pub fn new(storage: S, config: &RuntimeConfig, now_ms: u64) -> Self {
        let mut store = ConfigStore::new(storage);
        let version = store.version_check();
        let settings = store.load();
        info!(
            "ClockService: rules={:?} tz={} brightness={} format={:?}",
            version, settings.timezone_id, settings.brightness, settings.time_format
        );

        Self {
            store,
            state: ClockState::new(settings),
            version,
            dim: DimTracker::new(),
            day_timer: DayAdvanceTimer::new(now_ms, config.day_advance_interval_ms),
            observed_date: None,
            observed_minute: None,
            shown_frame: None,
            shown_brightness: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Derive DST and dim state from the RTC and draw the first frame.
    pub fn start(&mut self, rtc: &impl RtcPort, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        let now = rtc.now();
        self.refresh(now, display, sink);
        sink.emit(&ClockEvent::Started {
            version: self.version,
        });
        sink.emit(&ClockEvent::Status(self.status(now)));
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One loop iteration: date auto-advance, DST, dim, display.
    pub fn tick(
        &mut self,
        rtc: &mut impl RtcPort,
        clock: &impl MonotonicClock,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        // 1. 24-hour date auto-advance
        if self.day_timer.poll(clock.millis()) {
            let now = rtc.now();
            let next = now.date.next_day();
            rtc.adjust(DateTime { date: next, ..now });
            sink.emit(&ClockEvent::DateAdvanced {
                from: now.date,
                to: next,
            });
        }

        // 2–4. DST once per date, dim once per minute, redraw on change
        self.refresh(rtc.now(), display, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Parse and apply one protocol line.
    pub fn handle_line(
        &mut self,
        line: &[u8],
        rtc: &mut impl RtcPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> Response {
        match parse_bytes(line) {
            Ok(cmd) => self.handle_command(cmd, rtc, display, sink),
            Err(ParseError::Unknown) => Response::unknown(line),
            Err(e) => match e.kind() {
                Some(kind) => reject(kind, &Error::from(e)),
                None => Response::unknown(line),
            },
        }
    }

    /// Apply a parsed command.
    ///
    /// A rejected command changes nothing. After a storage failure the
    /// settings are whatever storage still holds.
    pub fn handle_command(
        &mut self,
        cmd: Command,
        rtc: &mut impl RtcPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> Response {
        match self.apply(cmd, rtc, sink) {
            Ok(response) => {
                self.refresh(rtc.now(), display, sink);
                response
            }
            Err(e) => match cmd.kind() {
                Some(kind) => reject(kind, &e),
                None => Response::unknown(&[]),
            },
        }
    }

    fn apply(&mut self, cmd: Command, rtc: &mut impl RtcPort, sink: &mut impl EventSink) -> Result<Response> {
        let response = match cmd {
            Command::SetTime {
                hour,
                minute,
                second,
            } => {
                let now = rtc.now();
                rtc.adjust(DateTime::new(now.date, hour, minute, second));
                sink.emit(&ClockEvent::SettingChanged {
                    what: "time",
                    persisted: false,
                });
                Response::Time {
                    hour,
                    minute,
                    second,
                }
            }
            Command::SetDate(date) => {
                let now = rtc.now();
                rtc.adjust(DateTime { date, ..now });
                // recompute DST for the new date right away
                self.observed_date = None;
                sink.emit(&ClockEvent::SettingChanged {
                    what: "date",
                    persisted: false,
                });
                Response::Date(date)
            }
            Command::SetFormat(format) => {
                self.persist(Field::TimeFormat, format.flag(), sink)?;
                let stored = self.state.settings.time_format;
                let hour24 = rtc.now().hour;
                let shown = if stored == TimeFormat::H12 {
                    format_12_hour(hour24)
                } else {
                    hour24
                };
                debug!(
                    "DBG | F requested={} stored={} rtc_hour24={} shown_hour={}",
                    format.flag(),
                    stored.flag(),
                    hour24,
                    shown
                );
                Response::Format(stored)
            }
            Command::SetTimezone(id) => {
                self.persist(Field::TimezoneId, id, sink)?;
                self.observed_date = None;
                Response::Timezone(self.state.settings.timezone_id)
            }
            Command::SetBrightness(level) => {
                self.persist(Field::Brightness, level, sink)?;
                Response::Brightness(self.state.settings.brightness)
            }
            Command::SetSchedule(enabled) => {
                self.persist(Field::ScheduleEnabled, u8::from(enabled), sink)?;
                self.observed_minute = None;
                Response::Schedule(self.state.settings.schedule.enabled)
            }
            Command::SetDimWindow { at, brightness } => {
                self.persist_all(
                    "dim_window",
                    &[
                        (Field::DimHour, at.hour),
                        (Field::DimMinute, at.minute),
                        (Field::DimBrightness, brightness),
                    ],
                    sink,
                )?;
                self.observed_minute = None;
                let s = &self.state.settings.schedule;
                Response::DimWindow {
                    at: s.dim_at,
                    brightness: s.dim_brightness,
                }
            }
            Command::SetBrightWindow { at, brightness } => {
                self.persist_all(
                    "bright_window",
                    &[
                        (Field::BrightHour, at.hour),
                        (Field::BrightMinute, at.minute),
                        (Field::BrightBrightness, brightness),
                    ],
                    sink,
                )?;
                self.observed_minute = None;
                let s = &self.state.settings.schedule;
                Response::BrightWindow {
                    at: s.bright_at,
                    brightness: s.bright_brightness,
                }
            }
            Command::Query(query) => self.answer(query, &*rtc),
        };
        Ok(response)
    }

    fn answer(&self, query: Query, rtc: &impl RtcPort) -> Response {
        let dst_active = self.state.runtime.dst_active;
        match query {
            Query::Format => Response::QueryFormat(self.state.settings.time_format),
            Query::Schedule => Response::QuerySchedule {
                schedule: self.state.settings.schedule,
                dim_now: self.state.runtime.currently_dim,
            },
            Query::Brightness => Response::QueryBrightness(self.state.settings.brightness),
            Query::Timezone => Response::QueryTimezone {
                entry: timezone::lookup(self.state.settings.timezone_id).unwrap_or(&TIMEZONES[0]),
                dst_active,
            },
            Query::DateTime => Response::QueryDateTime {
                now: rtc.now(),
                dst_active,
            },
        }
    }

    // ── Derived state ─────────────────────────────────────────

    /// Whether DST applies on `date` for the configured timezone. Pure.
    pub fn recompute_dst(&self, date: CalendarDate) -> bool {
        timezone::dst_rule_for(self.state.settings.timezone_id).is_active(date)
    }

    fn refresh(&mut self, now: DateTime, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        if self.observed_date != Some(now.date) {
            self.observed_date = Some(now.date);
            let active = self.recompute_dst(now.date);
            if active != self.state.runtime.dst_active {
                self.state.runtime.dst_active = active;
                sink.emit(&ClockEvent::DstChanged {
                    date: now.date,
                    rule: timezone::dst_rule_for(self.state.settings.timezone_id),
                    active,
                });
            }
        }

        let hour = self.state.local_hour(now.hour);
        if self.observed_minute != Some((hour, now.minute)) {
            self.observed_minute = Some((hour, now.minute));
            let schedule = &self.state.settings.schedule;
            let dim = is_in_dim_period(hour, now.minute, schedule.dim_at, schedule.bright_at);
            self.state.runtime.currently_dim = dim;
            if let Some(dim) = self.dim.update(dim) {
                sink.emit(&ClockEvent::DimChanged {
                    dim,
                    brightness: self.state.effective_brightness(),
                });
            }
        }

        let brightness = self.state.effective_brightness();
        if self.shown_brightness != Some(brightness) {
            self.shown_brightness = Some(brightness);
            display.set_brightness(brightness);
        }

        let frame = self.state.frame(hour, now.minute);
        if self.shown_frame != Some(frame) {
            self.shown_frame = Some(frame);
            display.show(&frame);
        }
    }

    // ── Persistence ───────────────────────────────────────────

    // Settings are re-read after every attempt, failed or not, so memory
    // always mirrors storage.

    fn persist(&mut self, field: Field, value: u8, sink: &mut impl EventSink) -> Result<()> {
        let outcome = self.store.set(field, value);
        self.resync();
        let written = outcome?;
        sink.emit(&ClockEvent::SettingChanged {
            what: field.name(),
            persisted: written,
        });
        Ok(())
    }

    fn persist_all(&mut self, what: &'static str, fields: &[(Field, u8)], sink: &mut impl EventSink) -> Result<()> {
        let outcome = self.store.set_all(fields);
        self.resync();
        let written = outcome?;
        sink.emit(&ClockEvent::SettingChanged {
            what,
            persisted: written > 0,
        });
        Ok(())
    }

    fn resync(&mut self) {
        let loaded = self.store.load();
        if loaded != self.state.settings {
            self.state.settings = loaded;
            self.observed_date = None;
            self.observed_minute = None;
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn version(&self) -> VersionStatus {
        self.version
    }

    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    pub fn status(&self, now: DateTime) -> ClockStatus {
        ClockStatus {
            now,
            timezone: timezone::lookup(self.state.settings.timezone_id).map_or("?", |entry| entry.name),
            state: self.state,
            brightness: self.state.effective_brightness(),
        }
    }
}

fn reject(kind: CommandKind, err: &Error) -> Response {
    if err.is_storage() {
        warn!("CMD | {} failed: {}", kind.letter(), err);
        Response::StorageFailed(kind)
    } else {
        debug!("CMD | {} rejected: {}", kind.letter(), err);
        Response::Rejected(kind)
    }
}
