//! Home Assistant error types

use thiserror::Error;

/// Errors that can occur while talking to Home Assistant
#[derive(Debug, Error)]
pub enum HomeAssistantError {
    /// Connection to Home Assistant failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Referenced entity has no state
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// Access token was rejected
    #[error("Authentication failed: HTTP {status}")]
    Unauthorized {
        /// HTTP status code
        status: u16,
    },

    /// Non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a state document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl HomeAssistantError {
    /// Returns true if a later attempt could succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(HomeAssistantError::ConnectionFailed("x".to_string()).is_retryable());
        assert!(HomeAssistantError::Timeout { timeout_secs: 5 }.is_retryable());
        assert!(!HomeAssistantError::EntityNotFound("schedule.x".to_string()).is_retryable());
        assert!(!HomeAssistantError::Unauthorized { status: 401 }.is_retryable());
    }

    #[test]
    fn test_display() {
        let err = HomeAssistantError::EntityNotFound("schedule.commute".to_string());
        assert_eq!(err.to_string(), "Entity not found: schedule.commute");
    }
}
