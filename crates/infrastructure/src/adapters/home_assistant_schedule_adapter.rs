//! Schedule adapter - Implements SchedulePort using integration_homeassistant

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::SchedulePort;
use async_trait::async_trait;
use domain::EntityId;
use integration_homeassistant::{HomeAssistantClient, HomeAssistantError};
use tracing::{debug, instrument};

/// Reads schedule entities from Home Assistant
pub struct HomeAssistantScheduleAdapter {
    client: Arc<dyn HomeAssistantClient>,
}

impl std::fmt::Debug for HomeAssistantScheduleAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeAssistantScheduleAdapter")
            .field("client", &"dyn HomeAssistantClient")
            .finish()
    }
}

impl HomeAssistantScheduleAdapter {
    /// Create an adapter around a shared client
    #[must_use]
    pub fn new(client: Arc<dyn HomeAssistantClient>) -> Self {
        Self { client }
    }
}

/// Map a Home Assistant client error to an application error
pub(crate) fn map_home_assistant_error(e: HomeAssistantError) -> ApplicationError {
    match e {
        HomeAssistantError::EntityNotFound(entity) => {
            ApplicationError::NotFound(format!("referenced state is missing: {entity}"))
        },
        HomeAssistantError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(format!("Home Assistant request failed: {other}")),
    }
}

#[async_trait]
impl SchedulePort for HomeAssistantScheduleAdapter {
    #[instrument(skip(self), fields(entity_id = %schedule))]
    async fn is_on(&self, schedule: &EntityId) -> Result<bool, ApplicationError> {
        let state = self
            .client
            .get_state(schedule)
            .await
            .map_err(map_home_assistant_error)?;

        debug!(state = %state.state, "Schedule state");
        Ok(state.is_on())
    }
}
