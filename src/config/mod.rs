//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AHP_CALCULATOR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use ahp_calculator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Weights keep {} decimals", config.analysis.weight_precision);
//! ```

mod analysis;
mod error;
mod logging;

pub use analysis::{AnalysisConfig, MAX_WEIGHT_PRECISION};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "AHP_CALCULATOR";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable config.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Calculator settings (precision, validation mode, consistency)
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging configuration (filter, format)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AHP_CALCULATOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AHP_CALCULATOR__ANALYSIS__WEIGHT_PRECISION=4` -> `analysis.weight_precision = 4`
    /// - `AHP_CALCULATOR__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables layered on top
    ///
    /// The format (TOML, YAML, JSON) follows the file extension. A missing
    /// file is not an error.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{ConsistencyMethod, ValidationMode};
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "AHP_CALCULATOR__ANALYSIS__WEIGHT_PRECISION",
        "AHP_CALCULATOR__ANALYSIS__VALIDATION",
        "AHP_CALCULATOR__ANALYSIS__CONSISTENCY_METHOD",
        "AHP_CALCULATOR__ANALYSIS__CONSISTENCY_THRESHOLD",
        "AHP_CALCULATOR__LOGGING__LEVEL",
        "AHP_CALCULATOR__LOGGING__FORMAT",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.analysis.weight_precision, 4);
        assert_eq!(config.analysis.validation, ValidationMode::Strict);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AHP_CALCULATOR__ANALYSIS__WEIGHT_PRECISION", "6");
        env::set_var("AHP_CALCULATOR__ANALYSIS__VALIDATION", "lenient");
        env::set_var("AHP_CALCULATOR__ANALYSIS__CONSISTENCY_METHOD", "legacy");
        env::set_var("AHP_CALCULATOR__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.analysis.weight_precision, 6);
        assert_eq!(config.analysis.validation, ValidationMode::Lenient);
        assert_eq!(config.analysis.consistency_method, ConsistencyMethod::Legacy);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AHP_CALCULATOR__ANALYSIS__CONSISTENCY_THRESHOLD", "2.5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidThreshold(2.5))
        );
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[analysis]\nweight_precision = 3\nconsistency_threshold = 0.2\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();
        env::set_var("AHP_CALCULATOR__ANALYSIS__WEIGHT_PRECISION", "5");
        let result = AppConfig::load_from_file(file.path());
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.analysis.weight_precision, 5);
        assert_eq!(config.analysis.consistency_threshold, 0.2);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load_from_file("/nonexistent/ahp.toml").unwrap();
        assert_eq!(config.analysis.weight_precision, 4);
    }
}
