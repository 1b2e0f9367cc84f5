use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CubeSummationConfig {
    pub limits: Limits,
    pub output: OutputConfig,
}

/// Inclusive upper bounds enforced by the input parser.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Limits {
    pub max_test_cases: i64,
    pub max_cube_size: i64,
    pub max_operations: i64,
    /// Update values must lie in `-max_abs_value..=max_abs_value`.
    pub max_abs_value: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_test_cases: 50,
            max_cube_size: 100,
            max_operations: 1000,
            max_abs_value: 1_000_000_000,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Dump the parsed input as JSON before the results.
    pub debug: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error opening the configuration file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("error parsing the configuration file {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid limit {name}: must be between 1 and {max}, current: {value}")]
    InvalidLimit {
        name: &'static str,
        value: i64,
        max: i64,
    },
}

impl CubeSummationConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: display,
            source,
        })?;
        config.limits.validate()?;
        Ok(config)
    }
}

pub const TEST_CASES_CEILING: i64 = 10_000;
/// A cube this size holds 125 million cells, about 1 GB.
pub const CUBE_SIZE_CEILING: i64 = 500;
pub const OPERATIONS_CEILING: i64 = 1_000_000;

impl Limits {
    /// Rejects limits under 1 or above their ceiling. `max_abs_value` is
    /// further bounded so that summing a whole cube of extreme values fits
    /// in an `i64`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("max_test_cases", self.max_test_cases, TEST_CASES_CEILING),
            ("max_cube_size", self.max_cube_size, CUBE_SIZE_CEILING),
            ("max_operations", self.max_operations, OPERATIONS_CEILING),
        ];
        for &(name, value, max) in checks.iter() {
            check_limit(name, value, max)?;
        }
        let cells = self.max_cube_size.pow(3);
        check_limit("max_abs_value", self.max_abs_value, i64::MAX / cells)
    }
}

fn check_limit(name: &'static str, value: i64, max: i64) -> Result<(), ConfigError> {
    if value < 1 || value > max {
        return Err(ConfigError::InvalidLimit { name, value, max });
    }
    Ok(())
}
