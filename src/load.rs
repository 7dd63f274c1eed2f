//! the one-minute load average.
//!
//! see `proc_loadavg(5)` for more information.

use {
    crate::source::LoadSource,
    regex::Regex,
    std::{
        io::{self, BufRead, BufReader},
        sync::LazyLock,
    },
    thiserror::Error,
};

/// the leading decimal of the first line, e.g. `0.52` in `0.52 0.60 0.75 2/400 12345`.
static LOAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+").expect("load pattern is valid"));

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read load average: {0}")]
    Io(#[from] io::Error),
    #[error("no load average found")]
    NoLoadReading,
}

/// reads the one-minute load average from the given source.
///
/// the value is kept as the kernel printed it.
pub fn read(source: &impl LoadSource) -> Result<String, LoadError> {
    let reader = source.open()?;
    let line = BufReader::new(reader)
        .lines()
        .next()
        .transpose()?
        .ok_or(LoadError::NoLoadReading)?;

    parse(&line).map(str::to_owned)
}

/// extracts the one-minute load average from a line of `/proc/loadavg`.
pub fn parse(line: &str) -> Result<&str, LoadError> {
    LOAD.find(line)
        .map(|m| m.as_str())
        .ok_or(LoadError::NoLoadReading)
}
