//! parsers for the text printed by `sensors(1)`.
//!
//! the output format belongs to lm-sensors and varies between versions and chips. nothing here
//! attempts to negotiate that format: a reading that cannot be found is an error.

use {
    regex::Regex,
    std::{collections::BTreeMap, num::ParseIntError, sync::LazyLock},
    thiserror::Error,
};


/// matches a fan line, e.g. `fan1:        2401 RPM`.
static FAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"fan\d+:\s+(\d+)\sRPM").expect("fan pattern is valid"));

/// matches a core temperature, e.g. `Core 0:        +45.0°C  (high = +100.0°C, ...)`.
static CORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Core \d+):\s+([+-]\d+\.\d)").expect("core pattern is valid")
});

/// per-core temperatures, in degrees celsius, keyed by normalized label (`core0`, `core1`, ...).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoreTemps(BTreeMap<String, f64>);

#[derive(Debug, Error, Eq, PartialEq)]
pub enum SensorParseError {
    #[error("no fan speed found in sensor output")]
    NoFanReading,
    #[error("invalid fan speed: {0}")]
    InvalidFanSpeed(ParseIntError),
    #[error("no temperature reported for {label}")]
    MissingCore { label: String },
}

/// returns the speed of the first fan listed, in rpm.
pub fn parse_fan_speed(sensors: &str) -> Result<u32, SensorParseError> {
    let captures = FAN
        .captures(sensors)
        .ok_or(SensorParseError::NoFanReading)?;

    captures[1]
        .parse::<u32>()
        .map_err(SensorParseError::InvalidFanSpeed)
}

/// returns every core temperature listed.
///
/// output with no core lines yields an empty set of temperatures.
pub fn parse_core_temps(sensors: &str) -> CoreTemps {
    CORE.captures_iter(sensors)
        .filter_map(|captures| {
            let label = CoreTemps::normalize(&captures[1]);
            // the pattern only admits values that parse.
            let temp = captures[2].parse::<f64>().ok()?;
            Some((label, temp))
        })
        .collect::<BTreeMap<_, _>>()
        .into()
}

// === impl CoreTemps ===

impl CoreTemps {
    /// returns the temperature of the core with the given label.
    pub fn get(&self, label: &str) -> Result<f64, SensorParseError> {
        let Self(temps) = self;

        temps
            .get(label)
            .copied()
            .ok_or_else(|| SensorParseError::MissingCore {
                label: label.to_owned(),
            })
    }

    /// the number of cores reported.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// whether no cores were reported.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Core 0` becomes `core0`.
    fn normalize(label: &str) -> String {
        label.replace(' ', "").to_lowercase()
    }
}

/// wraps temperatures already keyed by normalized label.
impl From<BTreeMap<String, f64>> for CoreTemps {
    fn from(temps: BTreeMap<String, f64>) -> Self {
        Self(temps)
    }
}
