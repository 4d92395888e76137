//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; `VITALSTATS_DATABASE` overrides
//! the database path.
//!
//! # Example
//!
//! ```no_run
//! use vitalstats::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging(false, 0);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::schedule::ScheduleConfig;
use crate::domain::validate_fiscal_month;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::paths;

/// Environment variable overriding [`Config::database`].
pub const DATABASE_ENV: &str = "VITALSTATS_DATABASE";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every field has a default, so an empty file is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Calendar month (1-12) on which the sales year starts.
    #[serde(default = "default_fiscal_start_month")]
    pub fiscal_start_month: u32,

    /// Path to the SQLite store.
    ///
    /// Defaults to `~/.vitalstats/store.db`.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Daily run time for `serve`.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_fiscal_start_month() -> u32 {
    9
}

fn default_database_path() -> String {
    paths::default_database().to_string_lossy().into_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fiscal_start_month: default_fiscal_start_month(),
            database: default_database_path(),
            schedule: ScheduleConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., fiscal month out of range)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    /// Same as [`Config::load`] when the file exists.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.trim().is_empty() {
                self.database = database;
            }
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        validate_fiscal_month(self.fiscal_start_month)?;
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        self.schedule.run_at()?;
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Render the effective configuration back to TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Logging settings after the `-q` / `-v` flags. Verbosity wins over quiet.
    #[must_use]
    pub fn logging_for(&self, quiet: bool, verbose: u8) -> LoggingConfig {
        let mut logging = self.logging.clone().with_verbosity(verbose);
        if quiet && verbose == 0 {
            logging.level = "warn".into();
        }
        logging
    }

    /// Initialize logging with the configured settings and CLI flags.
    pub fn init_logging(&self, quiet: bool, verbose: u8) {
        self.logging_for(quiet, verbose).init();
    }
}
