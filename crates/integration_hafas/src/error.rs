//! HaFAS error types

use thiserror::Error;

/// Errors that can occur while talking to the HaFAS gateway
#[derive(Debug, Error)]
pub enum HafasError {
    /// Connection to the gateway failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Gateway answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API key was rejected
    #[error("Authentication failed: HTTP {status}")]
    Unauthorized {
        /// HTTP status code (401 or 403)
        status: u16,
    },

    /// Failed to parse the trip document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

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

impl HafasError {
    /// Returns true if a later attempt could succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}
