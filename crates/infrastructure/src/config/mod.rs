//! Application configuration
//!
//! Loaded from an optional TOML file and overridden by `HAFAS_SENSOR_*`
//! environment variables. Nested keys use a double underscore, e.g.
//! `HAFAS_SENSOR_HAFAS__API_KEY` or `HAFAS_SENSOR_HOME_ASSISTANT__TOKEN`.
//!
//! Sensor entries are not part of this file; see
//! [`SensorStore`](crate::persistence::SensorStore).

mod logging;

use std::path::{Path, PathBuf};

use domain::GeoLocation;
use integration_hafas::HafasConfig;
use integration_homeassistant::HomeAssistantConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use logging::{LogFormat, LoggingConfig};

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "HAFAS_SENSOR";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "config";

/// Errors while loading or checking the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File or environment could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HaFAS gateway
    pub hafas: HafasConfig,

    /// Home Assistant REST API
    pub home_assistant: HomeAssistantConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Seconds between update ticks of each sensor
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,

    /// TOML file holding the sensor entries
    #[serde(default = "default_sensors_file")]
    pub sensors_file: PathBuf,
}

const fn default_tick_interval_secs() -> u64 {
    60
}

fn default_sensors_file() -> PathBuf {
    PathBuf::from("sensors.toml")
}

impl AppConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Without `path`, `config.toml` in the working directory is used if it
    /// exists. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`Self::load`], reading overrides from `env` instead of the
    /// process environment when given
    pub(crate) fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("home_assistant.base_url", "http://localhost:8123")?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., HAFAS_SENSOR_HAFAS__HOST)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Check every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hafas
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[hafas] {e}")))?;
        self.home_assistant
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[home_assistant] {e}")))?;

        if self.tick_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.logging.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "[logging] log_filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Home location offered by the setup wizard
    #[must_use]
    pub const fn home_location(&self) -> Option<GeoLocation> {
        self.home_assistant.home
    }

    /// Tick interval as a `Duration`
    #[must_use]
    pub const fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tick_interval_secs)
    }
}
