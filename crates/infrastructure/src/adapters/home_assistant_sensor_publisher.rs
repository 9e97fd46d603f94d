//! Sensor publisher - Implements SensorPublisherPort using integration_homeassistant

use std::sync::Arc;

use application::SensorConfig;
use application::error::ApplicationError;
use application::ports::SensorPublisherPort;
use async_trait::async_trait;
use domain::SensorState;
use integration_homeassistant::{HomeAssistantClient, StateUpdate};
use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use super::home_assistant_schedule_adapter::map_home_assistant_error;

/// Icon shown for departure sensors
pub const SENSOR_ICON: &str = "mdi:timetable";

/// Device class that makes Home Assistant render the state as a time
pub const SENSOR_DEVICE_CLASS: &str = "timestamp";

/// Writes departure sensor states to Home Assistant
pub struct HomeAssistantSensorPublisher {
    client: Arc<dyn HomeAssistantClient>,
}

impl std::fmt::Debug for HomeAssistantSensorPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeAssistantSensorPublisher")
            .field("client", &"dyn HomeAssistantClient")
            .finish()
    }
}

impl HomeAssistantSensorPublisher {
    /// Create a publisher around a shared client
    #[must_use]
    pub fn new(client: Arc<dyn HomeAssistantClient>) -> Self {
        Self { client }
    }

    /// Build the state document for a sensor
    pub fn state_update(
        sensor: &SensorConfig,
        state: &SensorState,
    ) -> Result<StateUpdate, ApplicationError> {
        let connections = serde_json::to_value(&state.connections)
            .map_err(|e| ApplicationError::Internal(format!("Cannot encode connections: {e}")))?;

        let mut attributes = Map::new();
        attributes.insert("connections".to_string(), connections);
        attributes.insert("active".to_string(), Value::Bool(state.active));
        attributes.insert("last_query".to_string(), json!(state.last_query.to_rfc3339()));
        attributes.insert("device_class".to_string(), json!(SENSOR_DEVICE_CLASS));
        attributes.insert("icon".to_string(), json!(SENSOR_ICON));
        attributes.insert("friendly_name".to_string(), json!(sensor.name));
        attributes.insert("unique_id".to_string(), json!(sensor.unique_id.to_string()));

        Ok(StateUpdate {
            state: state.state_value(),
            attributes,
        })
    }
}

#[async_trait]
impl SensorPublisherPort for HomeAssistantSensorPublisher {
    #[instrument(skip(self, sensor, state), fields(unique_id = %sensor.unique_id))]
    async fn publish(
        &self,
        sensor: &SensorConfig,
        state: &SensorState,
    ) -> Result<(), ApplicationError> {
        let entity_id = sensor.entity_id()?;
        let update = Self::state_update(sensor, state)?;

        self.client
            .set_state(&entity_id, &update)
            .await
            .map_err(map_home_assistant_error)?;

        debug!(%entity_id, state = %update.state, "Sensor published");
        Ok(())
    }
}
