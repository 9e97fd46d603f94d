//! Sensor publishing port

use async_trait::async_trait;
use domain::SensorState;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::sensor_config::SensorConfig;

/// Port for exposing a sensor state to the home automation host
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SensorPublisherPort: Send + Sync {
    /// Publish the sensor's current state and attributes
    async fn publish(
        &self,
        sensor: &SensorConfig,
        state: &SensorState,
    ) -> Result<(), ApplicationError>;
}
