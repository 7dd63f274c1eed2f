use {
    crate::record::RecordError,
    std::{path::PathBuf, time::Duration},
};

/// fixed settings for a sampling run.
#[derive(Clone, Debug)]
pub struct Config {
    /// where readings are appended.
    ///
    /// `None` is `~/core_temp.csv`, resolved only once there is a reading to write.
    pub log: Option<PathBuf>,
    /// how far back the journal is searched for throttle events.
    pub lookback: Duration,
    /// the journal text that marks a throttle event.
    pub throttle_marker: String,
    /// the title of the desktop notification raised on throttling.
    pub notify_title: String,
}

// === impl Config ===

impl Config {
    const LOG_FILE: &str = "core_temp.csv";
    const LOOKBACK: Duration = Duration::from_secs(60);
    const THROTTLE_MARKER: &str = "Core temperature above threshold, cpu clock throttled";
    const NOTIFY_TITLE: &str = "CPU Throttled";

    /// the default settings, logging to `~/core_temp.csv`.
    pub fn new() -> Self {
        Self {
            log: None,
            lookback: Self::LOOKBACK,
            throttle_marker: Self::THROTTLE_MARKER.to_owned(),
            notify_title: Self::NOTIFY_TITLE.to_owned(),
        }
    }

    /// the default settings, logging to the given file.
    pub fn with_log(log: impl Into<PathBuf>) -> Self {
        Self {
            log: Some(log.into()),
            ..Self::new()
        }
    }

    /// returns the file readings are appended to.
    pub fn log_path(&self) -> Result<PathBuf, RecordError> {
        match &self.log {
            Some(log) => Ok(log.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(Self::LOG_FILE))
                .ok_or(RecordError::NoHomeDir),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
