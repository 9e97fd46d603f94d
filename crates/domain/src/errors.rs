//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Date/time parsing error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    /// Local time does not exist in the configured zone (DST gap)
    #[error("Local time {local} does not exist in {zone}")]
    NonexistentLocalTime {
        /// The local date/time that was requested
        local: String,
        /// The IANA zone name
        zone: String,
    },

    /// Malformed `HH:MM:SS` delay string
    #[error("Invalid delay: {0}")]
    InvalidDelay(String),

    /// Malformed Home Assistant entity id
    #[error("Invalid entity id: {0}")]
    InvalidEntityId(String),

    /// Unknown IANA time zone
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_datetime_error_message() {
        let err = DomainError::InvalidDateTime("not a date".to_string());
        assert_eq!(err.to_string(), "Invalid date/time: not a date");
    }

    #[test]
    fn nonexistent_local_time_message() {
        let err = DomainError::NonexistentLocalTime {
            local: "2024-03-31 02:30:00".to_string(),
            zone: "Europe/Berlin".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Local time 2024-03-31 02:30:00 does not exist in Europe/Berlin"
        );
    }

    #[test]
    fn invalid_delay_message() {
        let err = DomainError::InvalidDelay("1:2".to_string());
        assert_eq!(err.to_string(), "Invalid delay: 1:2");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}
