use {
    super::*,
    crate::source::{FrozenClock, MockLoadAvg, MockRunner},
    chrono::{NaiveDate, NaiveDateTime},
    tempfile::TempDir,
};

const SENSORS: &str = "\
thinkpad-isa-0000
Adapter: ISA adapter
fan1:        1200 RPM

coretemp-isa-0000
Adapter: ISA adapter
Physical id 0:  +43.0°C  (high = +87.0°C, crit = +105.0°C)
Core 0:         +40.0°C  (high = +87.0°C, crit = +105.0°C)
Core 1:         +42.0°C  (high = +87.0°C, crit = +105.0°C)
";

const QUIET_JOURNAL: &str = "\
Oct 19 13:02:10 thinkpad systemd[1]: Started Session 4 of user sam.
Oct 19 13:02:12 thinkpad kernel: CPU1: Core temperature/speed normal
";

const THROTTLED: &str = "Oct 19 13:02:11 thinkpad kernel: CPU1: Core temperature above threshold, cpu clock throttled (total events = 12)";

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_micro_opt(13, 2, 11, 250000))
        .unwrap()
}

/// builds an app logging to a scratch directory.
fn app(runner: MockRunner, loadavg: &str) -> (App<MockRunner, MockLoadAvg, FrozenClock>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_log(dir.path().join("core_temp.csv"));

    let source = MockLoadAvg::new(loadavg);
    (App::with(config, runner, source, FrozenClock(now())), dir)
}

fn recorder(dir: &TempDir) -> Recorder {
    Recorder::new(dir.path().join("core_temp.csv"))
}

#[test]
fn quiet_run() {
    let runner = MockRunner::default()
        .with("sensors", SENSORS)
        .with("journalctl", QUIET_JOURNAL);
    let (app, dir) = app(runner, "0.10 0.08 0.05 1/312 4821\n");

    let reading = app.run().unwrap();
    let expected = Reading {
        timestamp: now(),
        fan_speed: 1200,
        core0_temp: 40.0,
        core1_temp: 42.0,
        system_load: "0.10".to_owned(),
        throttle_logs: String::new(),
    };
    assert_eq!(reading, expected);
    assert_eq!(recorder(&dir).readings().unwrap(), vec![expected]);
    assert!(app.runner.calls_to("notify-send").is_empty());
}

#[test]
fn throttled_run() {
    let journal = format!("{QUIET_JOURNAL}{THROTTLED}\n");
    let runner = MockRunner::default()
        .with("sensors", SENSORS)
        .with("journalctl", &journal)
        .with("notify-send", "");
    let (app, dir) = app(runner, "2.37 1.10 0.80 3/312 4821\n");

    let reading = app.run().unwrap();
    assert_eq!(reading.throttle_logs, THROTTLED);
    assert_eq!(recorder(&dir).readings().unwrap(), vec![reading]);

    let [notification] = app.runner.calls_to("notify-send").try_into().unwrap();
    let [title, body] = notification.args.try_into().unwrap();
    assert_eq!(title, "CPU Throttled");
    assert!(body.contains("40.0"));
    assert!(body.contains("42.0"));
    assert!(body.contains("2.37"));
}

#[test]
fn throttled_twice() {
    let journal = format!("{THROTTLED}\n{THROTTLED}\n");
    let runner = MockRunner::default()
        .with("sensors", SENSORS)
        .with("journalctl", &journal)
        .with("notify-send", "");
    let (app, dir) = app(runner, "2.37 1.10 0.80 3/312 4821\n");

    app.run().unwrap();

    let [reading] = recorder(&dir).readings().unwrap().try_into().unwrap();
    assert_eq!(reading.throttle_logs, format!("{THROTTLED} :::: {THROTTLED}"));
}

#[test]
fn commands_in_order() {
    let runner = MockRunner::default()
        .with("sensors", SENSORS)
        .with("journalctl", QUIET_JOURNAL);
    let (app, _dir) = app(runner, "0.10 0.08 0.05 1/312 4821\n");

    app.run().unwrap();

    let programs = app
        .runner
        .calls()
        .into_iter()
        .map(|call| call.program)
        .collect::<Vec<_>>();
    assert_eq!(programs, ["sensors", "journalctl"]);
}

#[test]
fn no_fan_aborts() {
    let runner = MockRunner::default()
        .with("sensors", "Core 0:  +40.0°C\nCore 1:  +42.0°C\n")
        .with("journalctl", QUIET_JOURNAL);
    let (app, dir) = app(runner, "0.10 0.08 0.05 1/312 4821\n");

    let err = app.run().unwrap_err();
    assert!(matches!(
        err,
        Error::Sensor(SensorParseError::NoFanReading)
    ));
    assert!(!dir.path().join("core_temp.csv").exists());
}

#[test]
fn single_core_aborts() {
    let runner = MockRunner::default()
        .with("sensors", "fan1:  1200 RPM\nCore 0:  +40.0°C\n")
        .with("journalctl", QUIET_JOURNAL);
    let (app, dir) = app(runner, "0.10 0.08 0.05 1/312 4821\n");

    let err = app.run().unwrap_err();
    match err {
        Error::Sensor(SensorParseError::MissingCore { label }) if label == "core1" => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!dir.path().join("core_temp.csv").exists());
}

#[test]
fn missing_sensors_aborts() {
    let runner = MockRunner::default().with("journalctl", QUIET_JOURNAL);
    let (app, _dir) = app(runner, "0.10 0.08 0.05 1/312 4821\n");

    let err = app.run().unwrap_err();
    assert!(matches!(err, Error::Command(CommandError::Spawn { .. })));
}

#[test]
fn bad_loadavg_aborts() {
    let runner = MockRunner::default()
        .with("sensors", SENSORS)
        .with("journalctl", QUIET_JOURNAL);
    let (app, dir) = app(runner, "\n");

    let err = app.run().unwrap_err();
    assert!(matches!(err, Error::Load(LoadError::NoLoadReading)));
    assert!(!dir.path().join("core_temp.csv").exists());
}

/// the reading is kept even when the notification cannot be raised.
#[test]
fn missing_notify_send() {
    let journal = format!("{THROTTLED}\n");
    let runner = MockRunner::default()
        .with("sensors", SENSORS)
        .with("journalctl", &journal);
    let (app, dir) = app(runner, "2.37 1.10 0.80 3/312 4821\n");

    let err = app.run().unwrap_err();
    assert!(matches!(err, Error::Command(CommandError::Spawn { .. })));
    assert_eq!(recorder(&dir).readings().unwrap().len(), 1);
}

/// a log that cannot be opened fails the run only after sampling.
#[test]
fn unwritable_log() {
    let runner = MockRunner::default()
        .with("sensors", SENSORS)
        .with("journalctl", QUIET_JOURNAL);
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_log(dir.path().join("missing").join("core_temp.csv"));
    let app = App::with(
        config,
        runner,
        MockLoadAvg::new("0.10 0.08 0.05 1/312 4821\n"),
        FrozenClock(now()),
    );

    let err = app.run().unwrap_err();
    assert!(matches!(err, Error::Record(RecordError::Open { .. })));
    assert_eq!(app.runner.calls().len(), 2);
}
