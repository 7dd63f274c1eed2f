//! a cpu fan, temperature, and throttle sampler.
//!
//! each run reads the sensors, the load average, and the journal once, appends one row to a log,
//! and raises a desktop notification if the cpu was throttled. periodic sampling is left to
//! whatever schedules the runs.

use {
    self::{
        config::Config,
        load::LoadError,
        notify::Notifier,
        record::{Reading, RecordError, Recorder},
        sensors::SensorParseError,
        source::{
            Clock, CommandError, CommandRunner, LoadSource, ProcLoadAvg, SystemClock,
            SystemRunner,
        },
    },
    std::io,
    thiserror::Error,
};

pub mod config;
pub mod journal;
pub mod load;
pub mod notify;
pub mod record;
pub mod sensors;
pub mod source;

/// console output.
mod console;

#[cfg(test)]
mod tests;

/// samples the cpu's health.
pub struct App<R = SystemRunner, L = ProcLoadAvg, C = SystemClock> {
    config: Config,
    /// spawns `sensors`, `journalctl`, and `notify-send`.
    runner: R,
    /// the source of the load average.
    loadavg: L,
    /// the clock used to timestamp readings.
    clock: C,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Sensor(#[from] SensorParseError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("failed to print reading: {0}")]
    Io(#[from] io::Error),
}

// === impl App ===

impl App {
    /// initializes a new application that reads from the running system.
    pub fn new(config: Config) -> Self {
        Self::with(config, SystemRunner, ProcLoadAvg, SystemClock)
    }
}

impl<R, L, C> App<R, L, C>
where
    R: CommandRunner,
    L: LoadSource,
    C: Clock,
{
    /// initializes a new application with the given capabilities.
    pub fn with(config: Config, runner: R, loadavg: L, clock: C) -> Self {
        Self {
            config,
            runner,
            loadavg,
            clock,
        }
    }

    /// takes and records one reading.
    ///
    /// any failure aborts the run before the log is touched, so no partial rows are written.
    pub fn run(&self) -> Result<Reading, Error> {
        let Self {
            config,
            runner,
            loadavg,
            clock,
        } = self;

        let output = runner.run("sensors", &[])?;
        let fan_speed = sensors::parse_fan_speed(&output)?;
        let cores = sensors::parse_core_temps(&output);
        tracing::debug!(fan_speed, cores = cores.len(), "parsed sensor output");

        let system_load = load::read(loadavg)?;

        let throttle_logs =
            journal::throttle_events(runner, config.lookback, &config.throttle_marker)?
                .join(journal::SEPARATOR);

        let reading = Reading {
            timestamp: clock.now(),
            fan_speed,
            core0_temp: cores.get("core0")?,
            core1_temp: cores.get("core1")?,
            system_load,
            throttle_logs,
        };

        Self::emit(&reading)?;

        let recorder = Recorder::new(config.log_path()?);
        recorder.append(&reading)?;
        tracing::info!(log = %recorder.path().display(), "recorded reading");

        if reading.is_throttled() {
            tracing::warn!(logs = %reading.throttle_logs, "cpu was throttled");
            Notifier::new(runner, &config.notify_title).throttled(&reading)?;
        }

        Ok(reading)
    }
}
