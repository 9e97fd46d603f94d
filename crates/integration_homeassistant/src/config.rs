//! Home Assistant connection configuration

use domain::GeoLocation;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::HomeAssistantError;

/// Connection settings for the Home Assistant REST API
#[derive(Clone, Serialize, Deserialize)]
pub struct HomeAssistantConfig {
    /// Base URL, e.g. `http://homeassistant.local:8123`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Long-lived access token (sensitive)
    #[serde(skip_serializing)]
    pub token: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Home location, offered as origin/destination default by the setup wizard
    #[serde(default)]
    pub home: Option<GeoLocation>,
}

impl std::fmt::Debug for HomeAssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeAssistantConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("home", &self.home)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:8123".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl HomeAssistantConfig {
    /// Create a configuration with default timeout
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: SecretString::from(token.into()),
            timeout_secs: default_timeout_secs(),
            home: None,
        }
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The access token
    #[must_use]
    pub fn token_str(&self) -> &str {
        self.token.expose_secret()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or token is missing or the timeout is zero.
    pub fn validate(&self) -> Result<(), HomeAssistantError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(HomeAssistantError::ConfigurationError(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }

        if self.token.expose_secret().trim().is_empty() {
            return Err(HomeAssistantError::ConfigurationError(
                "token must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(HomeAssistantError::ConfigurationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_toml_like_json() {
        let config: HomeAssistantConfig = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8123");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.home.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_home_location() {
        let config: HomeAssistantConfig = serde_json::from_str(
            r#"{"token": "abc", "home": {"latitude": 50.77, "longitude": 6.08}}"#,
        )
        .unwrap();
        assert!((config.home.unwrap().latitude() - 50.77).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation() {
        assert!(HomeAssistantConfig::new("ha.local", "t").validate().is_err());
        assert!(HomeAssistantConfig::new("http://ha.local", "").validate().is_err());
        assert!(HomeAssistantConfig::new("http://ha.local:8123/", "t").validate().is_ok());
    }

    #[test]
    fn test_api_base_and_redaction() {
        let config = HomeAssistantConfig::new("http://ha.local:8123/", "very-secret");
        assert_eq!(config.api_base(), "http://ha.local:8123");
        assert!(!format!("{config:?}").contains("very-secret"));
    }
}
