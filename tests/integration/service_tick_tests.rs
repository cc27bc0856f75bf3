//! ClockService tick behaviour: date auto-advance, DST and dim transitions,
//! display refresh, and restart from persisted settings.

use tzclock::app::events::ClockEvent;
use tzclock::app::service::ClockService;
use tzclock::config::{RULES_VERSION, RuntimeConfig, Settings, TimeFormat};
use tzclock::datemath::CalendarDate;
use tzclock::dst::DstRule;
use tzclock::store::{Field, VersionStatus};

use crate::mock_hw::{DisplayCall, MockClock, MockDisplay, MockRtc, MockStorage, RecordingSink};

const DAY_MS: u64 = 86_400_000;

struct Rig {
    service: ClockService<MockStorage>,
    rtc: MockRtc,
    clock: MockClock,
    display: MockDisplay,
    sink: RecordingSink,
}

impl Rig {
    fn at(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        let rtc = MockRtc::at(year, month, day, hour, minute);
        let clock = MockClock::default();
        let mut display = MockDisplay::default();
        let mut sink = RecordingSink::default();
        let mut service = ClockService::new(MockStorage::erased(), &RuntimeConfig::default(), 0);
        service.start(&rtc, &mut display, &mut sink);
        Self {
            service,
            rtc,
            clock,
            display,
            sink,
        }
    }

    fn tick(&mut self) {
        self.service
            .tick(&mut self.rtc, &self.clock, &mut self.display, &mut self.sink);
    }

    fn command(&mut self, line: &str) -> String {
        self.service
            .handle_line(line.as_bytes(), &mut self.rtc, &mut self.display, &mut self.sink)
            .to_string()
    }

    fn count(&self, pred: impl Fn(&ClockEvent) -> bool) -> usize {
        self.sink.events.iter().filter(|&e| pred(e)).count()
    }
}

fn date(y: u16, m: u8, d: u8) -> CalendarDate {
    CalendarDate::new(y, m, d).unwrap()
}

#[test]
fn start_emits_started_and_status() {
    let rig = Rig::at(2026, 1, 15, 12, 0);
    assert!(matches!(
        rig.sink.events.first(),
        Some(ClockEvent::Started {
            version: VersionStatus::Blank
        })
    ));
    assert_eq!(rig.count(|e| matches!(e, ClockEvent::Status(_))), 1);
    assert_eq!(rig.display.frame().map(|f| f.number), Some(1200));
}

#[test]
fn date_advances_after_exactly_24_hours() {
    let mut rig = Rig::at(2028, 2, 28, 10, 0);

    rig.clock.advance(DAY_MS - 1);
    rig.tick();
    assert_eq!(rig.rtc.now.date, date(2028, 2, 28));

    rig.clock.advance(1);
    rig.tick();
    assert_eq!(rig.rtc.now.date, date(2028, 2, 29));
    assert_eq!((rig.rtc.now.hour, rig.rtc.now.minute), (10, 0));

    rig.clock.advance(DAY_MS);
    rig.tick();
    assert_eq!(rig.rtc.now.date, date(2028, 3, 1));
    assert_eq!(rig.count(|e| matches!(e, ClockEvent::DateAdvanced { .. })), 2);
}

#[test]
fn year_rolls_over() {
    let mut rig = Rig::at(2026, 12, 31, 8, 0);
    rig.clock.advance(DAY_MS);
    rig.tick();
    assert_eq!(rig.rtc.now.date, date(2027, 1, 1));
}

#[test]
fn dst_starts_when_date_advances_into_window() {
    let mut rig = Rig::at(2026, 3, 7, 12, 0);
    assert_eq!(rig.command("Z19"), "OK:Z19");
    assert!(!rig.service.state().runtime.dst_active);
    assert_eq!(rig.display.frame().map(|f| f.number), Some(1200));

    rig.clock.advance(DAY_MS);
    rig.tick();
    assert!(rig.service.state().runtime.dst_active);
    // local time is shown one hour ahead of the standard-time RTC
    assert_eq!(rig.display.frame().map(|f| f.number), Some(1300));

    for _ in 0..5 {
        rig.tick();
    }
    assert_eq!(
        rig.count(|e| matches!(
            e,
            ClockEvent::DstChanged {
                rule: DstRule::UsaCanada,
                active: true,
                ..
            }
        )),
        1
    );
}

#[test]
fn dst_ends_on_boundary_day() {
    let mut rig = Rig::at(2026, 10, 31, 9, 0);
    rig.command("Z19");
    assert!(rig.service.state().runtime.dst_active);

    rig.clock.advance(DAY_MS);
    rig.tick();
    assert_eq!(rig.rtc.now.date, date(2026, 11, 1));
    assert!(!rig.service.state().runtime.dst_active);
}

#[test]
fn dim_transition_changes_brightness_once() {
    let mut rig = Rig::at(2026, 1, 15, 21, 58);
    assert_eq!(rig.command("S1"), "OK:S1");
    assert_eq!(rig.display.brightness(), Some(5));

    rig.rtc.set_time(21, 59);
    rig.tick();
    assert_eq!(rig.display.brightness(), Some(5));

    rig.rtc.set_time(22, 0);
    rig.tick();
    assert_eq!(rig.display.brightness(), Some(1));
    assert!(rig.service.state().runtime.currently_dim);

    let brightness_calls = |d: &MockDisplay| {
        d.calls
            .iter()
            .filter(|c| matches!(c, DisplayCall::Brightness(_)))
            .count()
    };
    let before = brightness_calls(&rig.display);
    rig.tick();
    rig.tick();
    assert_eq!(brightness_calls(&rig.display), before);

    rig.rtc.set_time(7, 0);
    rig.tick();
    assert_eq!(rig.display.brightness(), Some(5));
    assert_eq!(rig.count(|e| matches!(e, ClockEvent::DimChanged { dim: true, .. })), 1);
}

#[test]
fn schedule_disabled_uses_base_brightness() {
    let mut rig = Rig::at(2026, 1, 15, 23, 0);
    rig.command("B6");
    assert!(rig.service.state().runtime.currently_dim);
    assert_eq!(rig.display.brightness(), Some(6));
}

#[test]
fn display_redraws_only_on_change() {
    let mut rig = Rig::at(2026, 1, 15, 9, 5);
    let shows = |d: &MockDisplay| d.calls.iter().filter(|c| matches!(c, DisplayCall::Show(_))).count();
    let initial = shows(&rig.display);
    rig.tick();
    rig.tick();
    assert_eq!(shows(&rig.display), initial);

    rig.rtc.set_time(9, 6);
    rig.tick();
    assert_eq!(shows(&rig.display), initial + 1);
}

#[test]
fn twelve_hour_frame() {
    let mut rig = Rig::at(2026, 1, 15, 0, 5);
    let f = rig.display.frame().unwrap();
    assert_eq!((f.number, f.leading_zero), (5, true));

    rig.command("F1");
    let f = rig.display.frame().unwrap();
    assert_eq!((f.number, f.leading_zero, f.colon), (1205, false, true));
    assert_eq!(rig.service.state().settings.time_format, TimeFormat::H12);
}

#[test]
fn settings_survive_restart() {
    let mut rig = Rig::at(2026, 6, 1, 12, 0);
    rig.command("B3");
    rig.command("F1");
    rig.command("Z11");
    rig.command("S1");
    rig.command("N21,30,0");
    let saved = rig.service.state().settings;

    let mut storage = MockStorage::erased();
    storage.bytes = rig.service.store().storage().bytes.clone();
    let restarted = ClockService::new(storage, &RuntimeConfig::default(), 0);

    assert_eq!(restarted.version(), VersionStatus::Current);
    assert_eq!(restarted.state().settings, saved);
    assert_eq!(saved.timezone_id, 11);
    assert_eq!(saved.schedule.dim_brightness, 0);
}

#[test]
fn all_zero_store_boots_with_defaults() {
    let service = ClockService::new(MockStorage::filled(0), &RuntimeConfig::default(), 0);
    assert_eq!(service.version(), VersionStatus::Blank);
    assert_eq!(service.state().settings, Settings::default());
}

#[test]
fn version_mismatch_is_non_fatal() {
    let mut storage = MockStorage::filled(0);
    storage.bytes[Field::RulesVersion.addr()] = RULES_VERSION + 1;
    storage.bytes[Field::Brightness.addr()] = 3;
    storage.bytes[Field::TimezoneId.addr()] = 1;

    let service = ClockService::new(storage, &RuntimeConfig::default(), 0);
    assert_eq!(
        service.version(),
        VersionStatus::Mismatch {
            stored: RULES_VERSION + 1,
            current: RULES_VERSION
        }
    );
    assert_eq!(service.state().settings.brightness, 3);
    assert_eq!(service.state().settings.timezone_id, 1);
    assert_eq!(service.state().settings.rules_version, RULES_VERSION);
}
