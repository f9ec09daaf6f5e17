//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; the book location can
//! be overridden with the `STAKELADDER_BOOK` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use stakeladder::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("stakeladder.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::gate::{GateConfig, MAX_DAY_OFFSET_MINUTES};
use super::logging::{LoggingConfig, LOG_FORMATS};
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`Config::book`].
pub const BOOK_ENV: &str = "STAKELADDER_BOOK";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the JSON book holding projects and wagers.
    ///
    /// Defaults to "stakeladder.json" in the current directory.
    #[serde(default = "default_book_path")]
    pub book: PathBuf,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cycle advancement gate.
    #[serde(default)]
    pub gate: GateConfig,
}

fn default_book_path() -> PathBuf {
    PathBuf::from("stakeladder.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            book: default_book_path(),
            logging: LoggingConfig::default(),
            gate: GateConfig::default(),
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
    /// - Validation fails (e.g., a zero activity requirement)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Some(book) = std::env::var_os(BOOK_ENV).filter(|v| !v.is_empty()) {
            config.book = PathBuf::from(book);
        }

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
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is unreadable or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.book.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "book" }.into());
        }
        if self.gate.min_active_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_active_days",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.gate.day_offset_minutes.abs() >= MAX_DAY_OFFSET_MINUTES {
            return Err(ConfigError::InvalidValue {
                field: "day_offset_minutes",
                reason: format!("must be within ±{MAX_DAY_OFFSET_MINUTES} minutes (exclusive)"),
            }
            .into());
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
