//! HaFAS gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::HafasError;

/// Connection settings for a HaFAS REST gateway
#[derive(Clone, Serialize, Deserialize)]
pub struct HafasConfig {
    /// Base URL; requests go to `{host}/trip`
    pub host: String,

    /// API key sent as bearer token (sensitive)
    #[serde(skip_serializing)]
    pub api_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// IANA zone the gateway reports local times in
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl std::fmt::Debug for HafasConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HafasConfig")
            .field("host", &self.host)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("time_zone", &self.time_zone)
            .finish()
    }
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_time_zone() -> String {
    domain::DEFAULT_TIME_ZONE.name().to_string()
}

impl HafasConfig {
    /// Create a configuration with default timeout and zone
    #[must_use]
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: SecretString::from(api_key.into()),
            timeout_secs: default_timeout_secs(),
            time_zone: default_time_zone(),
        }
    }

    /// Host without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// The API key
    #[must_use]
    pub fn api_key_str(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the host or key is missing, the timeout is zero
    /// or the zone is unknown.
    pub fn validate(&self) -> Result<(), HafasError> {
        if self.host.trim().is_empty() {
            return Err(HafasError::ConfigurationError(
                "host must not be empty".to_string(),
            ));
        }

        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(HafasError::ConfigurationError(format!(
                "host must be an http(s) URL, got {}",
                self.host
            )));
        }

        if self.api_key.expose_secret().trim().is_empty() {
            return Err(HafasError::ConfigurationError(
                "api_key must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(HafasError::ConfigurationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        domain::parse_time_zone(&self.time_zone)
            .map_err(|e| HafasError::ConfigurationError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = HafasConfig::new("https://hafas.example.org/", "key");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.time_zone, "Europe/Berlin");
        assert_eq!(config.base_url(), "https://hafas.example.org");
        assert_eq!(config.api_key_str(), "key");
    }

    #[test]
    fn test_validation_success() {
        assert!(HafasConfig::new("https://hafas.example.org", "key").validate().is_ok());
    }

    #[test]
    fn test_validation_empty_host() {
        assert!(HafasConfig::new("", "key").validate().is_err());
    }

    #[test]
    fn test_validation_host_without_scheme() {
        assert!(HafasConfig::new("hafas.example.org", "key").validate().is_err());
    }

    #[test]
    fn test_validation_empty_key() {
        assert!(HafasConfig::new("https://hafas.example.org", " ").validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = HafasConfig {
            timeout_secs: 0,
            ..HafasConfig::new("https://hafas.example.org", "key")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_unknown_zone() {
        let config = HafasConfig {
            time_zone: "Europe/Atlantis".to_string(),
            ..HafasConfig::new("https://hafas.example.org", "key")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = HafasConfig::new("https://hafas.example.org", "super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: HafasConfig =
            serde_json::from_str(r#"{"host": "https://h.example", "api_key": "k"}"#).unwrap();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.api_key_str(), "k");

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("api_key"));
    }
}
