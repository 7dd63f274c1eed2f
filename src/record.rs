//! readings, and the append-only log they are written to.

use {
    chrono::NaiveDateTime,
    serde::{Deserialize, Serialize},
    std::{
        fmt::{self, Display},
        fs::{File, OpenOptions},
        io,
        path::{Path, PathBuf},
    },
    thiserror::Error,
};

/// a snapshot of the cpu's fan, temperatures, load, and throttle activity.
///
/// fields are declared in log column order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "date_time", with = "timestamp")]
    pub timestamp: NaiveDateTime,
    pub fan_speed: u32,
    pub core0_temp: f64,
    pub core1_temp: f64,
    pub system_load: String,
    /// throttle lines from the journal, joined by [`crate::journal::SEPARATOR`].
    ///
    /// empty when the cpu was not throttled.
    pub throttle_logs: String,
}

/// appends readings to a csv log.
///
/// no header row is written, and nothing is ever rotated or truncated. appends from overlapping
/// runs may interleave, so runs must be serialized by whatever schedules them.
pub struct Recorder {
    path: PathBuf,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("could not determine the home directory")]
    NoHomeDir,
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write reading: {0}")]
    Csv(#[from] csv::Error),
}

// === impl Reading ===

impl Reading {
    pub fn is_throttled(&self) -> bool {
        !self.throttle_logs.is_empty()
    }
}

impl Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            timestamp,
            fan_speed,
            core0_temp,
            core1_temp,
            system_load,
            throttle_logs,
        } = self;

        write!(
            f,
            "{} fan: {fan_speed} rpm, core0: {core0_temp:.1}°C, core1: {core1_temp:.1}°C, load: {system_load}",
            timestamp.format(timestamp::FORMAT),
        )?;
        if !throttle_logs.is_empty() {
            write!(f, ", throttled: {throttle_logs}")?;
        }

        Ok(())
    }
}

// === impl Recorder ===

impl Recorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// appends one row to the log, creating it if needed.
    pub fn append(&self, reading: &Reading) -> Result<(), RecordError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.open_error(source))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(reading)?;
        writer.flush().map_err(csv::Error::from)?;

        Ok(())
    }

    /// reads every row back out of the log.
    pub fn readings(&self) -> Result<Vec<Reading>, RecordError> {
        let file = File::open(&self.path).map_err(|source| self.open_error(source))?;

        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(file)
            .into_deserialize()
            .collect::<Result<Vec<_>, _>>()
            .map_err(RecordError::from)
    }

    fn open_error(&self, source: io::Error) -> RecordError {
        RecordError::Open {
            path: self.path.clone(),
            source,
        }
    }
}

/// local timestamps with microsecond precision, e.g. `2026-10-19 13:02:11.482913`.
mod timestamp {
    use {
        chrono::NaiveDateTime,
        serde::{Deserialize, Deserializer, Serializer, de},
    };

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(de::Error::custom)
    }
}
