use std::{
    fs,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    errors::LedgerError,
    ledger::DEFAULT_STARTING_BALANCE,
    utils::paths::{self, app_data_dir, ensure_dir, write_atomic},
};

/// User preferences persisted as `config/config.json` under the app directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Balance used when no starting balance has been stored yet.
    pub default_starting_balance: Decimal,
    pub ui_color_enabled: bool,
    pub week_starts_on_monday: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_starting_balance: DEFAULT_STARTING_BALANCE,
            ui_color_enabled: true,
            week_starts_on_monday: false,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn week_start(&self) -> chrono::Weekday {
        if self.week_starts_on_monday {
            chrono::Weekday::Mon
        } else {
            chrono::Weekday::Sun
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&paths::config_dir_in(&base)).map_err(config_error)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path).map_err(config_error)?;
        serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| LedgerError::Config(err.to_string()))?;
        write_atomic(&self.path, &json).map_err(config_error)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    /// Directory the ledger files live in for `config`.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| paths::data_dir_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn config_error(err: std::io::Error) -> LedgerError {
    LedgerError::Config(err.to_string())
}
