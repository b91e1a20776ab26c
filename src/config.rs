use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::league::RecordingMode;
use crate::timer::DEFAULT_TICK_INTERVAL;

pub const DATA_DIR_VAR: &str = "LEAGUE_TRACKER_DATA_DIR";
pub const TICK_MS_VAR: &str = "LEAGUE_TRACKER_TICK_MS";
pub const RECORDING_MODE_VAR: &str = "LEAGUE_TRACKER_RECORDING_MODE";

const DEFAULT_DATA_DIR: &str = "./league-data";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number of milliseconds, got '{value}'")]
    InvalidTickInterval { var: &'static str, value: String },

    #[error("{var} must be 'append' or 'replace', got '{value}'")]
    InvalidRecordingMode { var: &'static str, value: String },
}

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: PathBuf,
    /// How often a running match timer reports remaining time
    pub tick_interval: Duration,
    /// How a finished match is written relative to its in-progress record
    pub recording_mode: RecordingMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tick_interval: DEFAULT_TICK_INTERVAL,
            recording_mode: RecordingMode::default(),
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from an arbitrary variable source; unset variables keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(TICK_MS_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidTickInterval {
                    var: TICK_MS_VAR,
                    value: raw.clone(),
                })?;
            config.tick_interval = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(RECORDING_MODE_VAR) {
            config.recording_mode =
                raw.parse()
                    .map_err(|_| ConfigError::InvalidRecordingMode {
                        var: RECORDING_MODE_VAR,
                        value: raw.clone(),
                    })?;
        }

        Ok(config)
    }
}
