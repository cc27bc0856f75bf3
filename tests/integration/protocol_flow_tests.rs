//! End-to-end command flows: transport bytes in, wire text out.

use tzclock::app::service::ClockService;
use tzclock::config::{RULES_VERSION, RuntimeConfig, ScheduleSettings};
use tzclock::protocol::CommandEngine;
use tzclock::protocol::transport::BufferTransport;
use tzclock::store::Field;

use crate::mock_hw::{MockDisplay, MockRtc, MockStorage, RecordingSink};

struct Rig {
    service: ClockService<MockStorage>,
    engine: CommandEngine,
    io: BufferTransport,
    rtc: MockRtc,
    display: MockDisplay,
    sink: RecordingSink,
}

impl Rig {
    fn with_storage(storage: MockStorage) -> Self {
        let rtc = MockRtc::at(2026, 1, 15, 12, 0);
        let mut display = MockDisplay::default();
        let mut sink = RecordingSink::default();
        let mut service = ClockService::new(storage, &RuntimeConfig::default(), 0);
        service.start(&rtc, &mut display, &mut sink);
        Self {
            service,
            engine: CommandEngine::new(),
            io: BufferTransport::new(),
            rtc,
            display,
            sink,
        }
    }

    fn new() -> Self {
        Self::with_storage(MockStorage::erased())
    }

    /// Send one line and return the response without its terminator.
    fn send(&mut self, line: &str) -> String {
        self.io.push_input(line.as_bytes());
        self.io.push_input(b"\n");
        self.poll()
    }

    fn poll(&mut self) -> String {
        let Self {
            service,
            engine,
            io,
            rtc,
            display,
            sink,
        } = self;
        engine
            .poll(io, |line| service.handle_line(line, rtc, display, sink))
            .unwrap();
        let out = io.take_output();
        out.strip_suffix("\r\n").unwrap_or(&out).to_string()
    }

    fn writes(&self) -> usize {
        self.service.store().storage().writes.len()
    }
}

#[test]
fn brightness_round_trip() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("B5"), "OK:B5");
    assert_eq!(rig.send("QB"), "OK:QB5");
    assert_eq!(rig.display.brightness(), Some(5));

    assert_eq!(rig.send("B9"), "ERR:B expected 0..7");
    assert_eq!(rig.send("QB"), "OK:QB5");

    assert_eq!(rig.send("B2"), "OK:B2");
    assert_eq!(rig.display.brightness(), Some(2));
}

#[test]
fn format_round_trip() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("QF"), "OK:QF0");
    assert_eq!(rig.send("F1"), "OK:F1");
    assert_eq!(rig.send("QF"), "OK:QF1");
    assert_eq!(rig.send("F2"), "ERR:F expected 0 or 1");
    assert_eq!(rig.send("F"), "ERR:F expected 0 or 1");
    assert_eq!(rig.send("QF"), "OK:QF1");
}

#[test]
fn timezone_selection() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("Z99"), "ERR:Z expected 0..20");
    assert_eq!(rig.send("Z-1"), "ERR:Z expected 0..20");
    assert_eq!(rig.send("Z19"), "OK:Z19");
    assert_eq!(rig.send("QZ"), "OK:QZ19,-5,New York,0");
    assert_eq!(rig.send("D7,4,2026"), "OK:D7/4/2026");
    assert_eq!(rig.send("QZ"), "OK:QZ19,-5,New York,1");
}

#[test]
fn time_and_date_setting() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("T25,0,0"), "ERR:T expected h,m,s");
    assert_eq!(rig.send("T12,34"), "ERR:T expected h,m,s");
    assert_eq!(rig.send("T9,5,7"), "OK:T9:5:7");

    assert_eq!(rig.send("D2,30,2026"), "ERR:D expected m,d,y");
    assert_eq!(rig.send("D1,1,2040"), "ERR:D expected m,d,y");
    assert_eq!(rig.send("D2,28,2026"), "OK:D2/28/2026");
    assert_eq!(rig.send("QD"), "OK:QD2/28/2026,9:5:7,0");
    // setting time and date never touches the settings store
    assert_eq!(rig.rtc.adjustments.len(), 2);
}

#[test]
fn schedule_configuration() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("QS"), "OK:QS0,22:0:1,7:0:5,0");
    assert_eq!(rig.send("S1"), "OK:S1");
    assert_eq!(rig.send("N23,15,2"), "OK:N23:15:2");
    assert_eq!(rig.send("Y6,30,6"), "OK:Y6:30:6");
    assert_eq!(rig.send("QS"), "OK:QS1,23:15:2,6:30:6,0");

    assert_eq!(rig.send("N24,0,1"), "ERR:N expected h,m,b");
    assert_eq!(rig.send("Y6,30,8"), "ERR:Y expected h,m,b");
    assert_eq!(rig.send("S2"), "ERR:S expected 0 or 1");
    assert_eq!(rig.send("QS"), "OK:QS1,23:15:2,6:30:6,0");
}

#[test]
fn dim_window_covering_now_dims_immediately() {
    let mut rig = Rig::new();
    rig.send("S1");
    assert_eq!(rig.display.brightness(), Some(5));
    assert_eq!(rig.send("N11,0,1"), "OK:N11:0:1");
    assert_eq!(rig.send("QS"), "OK:QS1,11:0:1,7:0:5,1");
    assert_eq!(rig.display.brightness(), Some(1));
}

#[test]
fn unknown_lines_are_echoed() {
    let mut rig = Rig::new();
    assert_eq!(rig.send("HELLO"), "ERR:UNKNOWN HELLO");
    assert_eq!(rig.send("QX"), "ERR:UNKNOWN QX");
    assert_eq!(rig.send("b5"), "ERR:UNKNOWN b5");
}

#[test]
fn overflow_then_recovery() {
    let mut rig = Rig::new();
    let long = "B".repeat(70);
    assert_eq!(rig.send(&long), "ERR:RX overflow");
    assert_eq!(rig.send("B3"), "OK:B3");
}

#[test]
fn one_response_per_poll() {
    let mut rig = Rig::new();
    rig.io.push_input(b"B1\r\nB2\r\n");
    assert_eq!(rig.poll(), "OK:B1");
    assert_eq!(rig.poll(), "OK:B2");
    assert_eq!(rig.poll(), "");
}

#[test]
fn unchanged_values_are_not_rewritten() {
    let mut rig = Rig::new();
    let after_init = rig.writes();
    assert_eq!(rig.send("B5"), "OK:B5");
    assert_eq!(rig.writes(), after_init);
    assert_eq!(rig.send("B4"), "OK:B4");
    assert_eq!(rig.writes(), after_init + 1);
    assert_eq!(rig.send("N22,0,1"), "OK:N22:0:1");
    assert_eq!(rig.writes(), after_init + 1);
}

#[test]
fn storage_failure_reports_and_keeps_state() {
    let mut storage = MockStorage::filled(0);
    storage.bytes[Field::RulesVersion.addr()] = RULES_VERSION;
    storage.bytes[Field::Brightness.addr()] = 6;
    storage.fail_writes = true;

    let mut rig = Rig::with_storage(storage);
    assert_eq!(rig.send("B3"), "ERR:B storage");
    assert_eq!(rig.send("QB"), "OK:QB6");
    // the loop keeps serving commands
    assert_eq!(rig.send("QF"), "OK:QF0");
}

/// Decode the schedule straight from the storage bytes.
fn stored_schedule(rig: &Rig) -> ScheduleSettings {
    rig.service.store().load().schedule
}

#[test]
fn interrupted_window_write_is_rolled_back() {
    let mut storage = MockStorage::initialised();
    storage.fail_after(1, true);
    let mut rig = Rig::with_storage(storage);
    assert_eq!(rig.writes(), 0);

    assert_eq!(rig.send("N23,15,2"), "ERR:N storage");
    let disk = stored_schedule(&rig);
    assert_eq!(disk, ScheduleSettings::default());
    assert_eq!(rig.service.state().settings.schedule, disk);
    assert_eq!(rig.send("QS"), "OK:QS0,22:0:1,7:0:5,0");

    // storage recovered; the same command now lands
    assert_eq!(rig.send("N23,15,2"), "OK:N23:15:2");
}

#[test]
fn memory_follows_storage_when_rollback_fails() {
    let mut storage = MockStorage::initialised();
    storage.fail_after(1, false);
    let mut rig = Rig::with_storage(storage);

    assert_eq!(rig.send("N23,15,2"), "ERR:N storage");
    let disk = stored_schedule(&rig);
    assert_eq!(disk.dim_at.hour, 23);
    assert_eq!(rig.service.state().settings.schedule, disk);
}

#[test]
fn non_utf8_arguments_get_the_setter_error() {
    let mut rig = Rig::new();
    rig.io.push_input(b"B\xFF\n");
    assert_eq!(rig.poll(), "ERR:B expected 0..7");
    rig.io.push_input(b"\xFF\xFE\n");
    assert!(rig.poll().starts_with("ERR:UNKNOWN "));
}

