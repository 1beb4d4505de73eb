//! Configuration management for penalty-tracker.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stats::SortKey;
use crate::storage::Backend;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "penalty-tracker";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "penalties.db";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "PENALTY_TRACKER_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PENALTY_TRACKER_`, sections
///    separated by `__`)
/// 2. TOML config file at `~/.config/penalty-tracker/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Report configuration.
    pub report: ReportConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which backend holds the tables.
    pub backend: Backend,
    /// Directory for CSV tables.
    /// Defaults to `~/.local/share/penalty-tracker`
    pub data_dir: Option<PathBuf>,
    /// Path to the `SQLite` database file.
    /// Defaults to `<data_dir>/penalties.db`
    pub database_path: Option<PathBuf>,
    /// Name of the roster table.
    pub athletes_table: String,
    /// Name of the kick history table.
    pub sessions_table: String,
}

/// Report-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Default ordering of the statistics listing.
    pub sort_by: SortKey,
    /// File written by `export` when no output is given.
    pub export_file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Csv,
            data_dir: None, // Will be resolved to default at runtime
            database_path: None,
            athletes_table: "Athletes".to_string(),
            sessions_table: "Sessions".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sort_by: SortKey::ConversionRate,
            export_file_name: "penalty_report.csv".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::figment(config_file).extract::<Config>()?.validated()
    }

    fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let tables = [
            ("athletes_table", &self.storage.athletes_table),
            ("sessions_table", &self.storage.sessions_table),
        ];
        for (key, name) in tables {
            if name.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("{key} must not be empty"),
                });
            }
            if name.contains(['/', '\\']) {
                return Err(Error::ConfigValidation {
                    message: format!("{key} must not contain path separators: {name}"),
                });
            }
        }

        if self.storage.athletes_table == self.storage.sessions_table {
            return Err(Error::ConfigValidation {
                message: format!(
                    "athletes_table and sessions_table must differ (both are '{}')",
                    self.storage.athletes_table
                ),
            });
        }

        if self.report.export_file_name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "export_file_name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| self.data_dir().join(DATABASE_FILE_NAME))
    }

    /// Where the selected backend keeps its data.
    #[must_use]
    pub fn storage_location(&self) -> PathBuf {
        match self.storage.backend {
            Backend::Csv => self.data_dir(),
            Backend::Sqlite => self.database_path(),
        }
    }
}
