//! HaFAS trip search client
//!
//! Issues one bearer-authenticated `GET {host}/trip` per query.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, instrument, warn};

use crate::config::HafasConfig;
use crate::error::HafasError;
use crate::models::TripResponse;

/// Trait for HaFAS trip search clients
#[async_trait]
pub trait HafasClient: Send + Sync {
    /// Search trips between two coordinate pairs
    async fn trip(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<TripResponse, HafasError>;

    /// Check that the client is usable before the first query
    async fn validate_connection(&self) -> Result<(), HafasError>;
}

/// `reqwest`-based HaFAS client
#[derive(Debug)]
pub struct HafasTripClient {
    client: Client,
    config: HafasConfig,
}

impl HafasTripClient {
    /// Create a new HaFAS client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &HafasConfig) -> Result<Self, HafasError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("hafas-sensor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HafasError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Coordinate query parameters for a trip search
    fn trip_params(origin: &GeoLocation, destination: &GeoLocation) -> [(&'static str, String); 4] {
        [
            ("originCoordLat", origin.latitude().to_string()),
            ("originCoordLong", origin.longitude().to_string()),
            ("destCoordLat", destination.latitude().to_string()),
            ("destCoordLong", destination.longitude().to_string()),
        ]
    }

    /// Parse the raw trip document
    fn parse_trip_response(body: &str) -> Result<TripResponse, HafasError> {
        serde_json::from_str(body).map_err(|e| HafasError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl HafasClient for HafasTripClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn trip(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<TripResponse, HafasError> {
        let url = format!("{}/trip", self.config.base_url());

        debug!(?url, "Searching trips");

        let response = self
            .client
            .get(&url)
            .query(&Self::trip_params(origin, destination))
            .bearer_auth(self.config.api_key_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HafasError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    HafasError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(HafasError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(HafasError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(HafasError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| HafasError::ParseError(e.to_string()))?;

        let result = Self::parse_trip_response(&body)?;

        if result.is_empty() {
            warn!("No trips found");
        }

        debug!(count = result.trips.len(), "Trips found");
        Ok(result)
    }

    async fn validate_connection(&self) -> Result<(), HafasError> {
        self.config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_params() {
        let origin = GeoLocation::new(50.7753, 6.0839).unwrap();
        let destination = GeoLocation::new(50.768, 6.091).unwrap();
        let params = HafasTripClient::trip_params(&origin, &destination);

        assert_eq!(params[0], ("originCoordLat", "50.7753".to_string()));
        assert_eq!(params[1], ("originCoordLong", "6.0839".to_string()));
        assert_eq!(params[2], ("destCoordLat", "50.768".to_string()));
        assert_eq!(params[3], ("destCoordLong", "6.091".to_string()));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = HafasTripClient::parse_trip_response("<html>502</html>");
        assert!(matches!(result, Err(HafasError::ParseError(_))));
    }

    #[test]
    fn test_parse_empty_document() {
        let result = HafasTripClient::parse_trip_response("{}").unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_validate_connection_checks_config() {
        let client = HafasTripClient::new(&HafasConfig::new("https://h.example", "k")).unwrap();
        assert!(client.validate_connection().await.is_ok());

        let client = HafasTripClient::new(&HafasConfig::new("https://h.example", "")).unwrap();
        assert!(client.validate_connection().await.is_err());
    }
}
