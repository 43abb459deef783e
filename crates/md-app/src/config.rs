use std::path::PathBuf;

use serde::Deserialize;

use crate::{book::PracticeLimits, error::DrillError};

/// Prefix of every environment variable read by [`DrillConfig::from_env`].
pub const ENV_PREFIX: &str = "DRILL_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DrillConfig {
    #[serde(default)]
    pub env: Environment,
    /// JSON file holding history, errors and the daily counter
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Write logs to daily files in this directory instead of stderr
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
    #[serde(default = "default_error_capacity")]
    pub error_capacity: usize,
    /// Print a Prometheus snapshot on exit
    #[serde(default)]
    pub metrics_dump: bool,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("mathdrill.json")
}

fn default_batch_size() -> usize {
    PracticeLimits::default().batch_size
}

fn default_daily_limit() -> u32 {
    PracticeLimits::default().daily_limit
}

fn default_error_capacity() -> usize {
    PracticeLimits::default().error_capacity
}

impl DrillConfig {
    /// Read `DRILL_*` variables from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let config: Self = envy::prefixed(ENV_PREFIX).from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Same as [`Self::from_env`] over an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DrillError> {
        if self.batch_size == 0 {
            return Err(DrillError::Config(
                "DRILL_BATCH_SIZE must be at least 1".to_string(),
            ));
        }
        if self.error_capacity == 0 {
            return Err(DrillError::Config(
                "DRILL_ERROR_CAPACITY must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub const fn limits(&self) -> PracticeLimits {
        PracticeLimits {
            batch_size: self.batch_size,
            daily_limit: self.daily_limit,
            error_capacity: self.error_capacity,
        }
    }
}
