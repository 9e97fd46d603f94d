//! Journey search port
//!
//! Turns an origin/destination pair into the connections shown on a sensor.

use async_trait::async_trait;
use domain::{Connection, GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for trip search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JourneyPort: Send + Sync {
    /// Search connections between two locations, one per trip
    async fn connections(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<Vec<Connection>, ApplicationError>;
}
