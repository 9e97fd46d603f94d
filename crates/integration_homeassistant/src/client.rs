//! Home Assistant REST client

use std::time::Duration;

use async_trait::async_trait;
use domain::EntityId;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::HomeAssistantConfig;
use crate::error::HomeAssistantError;
use crate::models::{CoreConfig, EntityState, StateUpdate};

/// Trait for Home Assistant state access
#[async_trait]
pub trait HomeAssistantClient: Send + Sync {
    /// Read the current state of an entity
    async fn get_state(&self, entity_id: &EntityId) -> Result<EntityState, HomeAssistantError>;

    /// Create or replace the state of an entity
    async fn set_state(
        &self,
        entity_id: &EntityId,
        update: &StateUpdate,
    ) -> Result<EntityState, HomeAssistantError>;

    /// Read the core configuration (home location, time zone)
    async fn get_config(&self) -> Result<CoreConfig, HomeAssistantError>;
}

/// `reqwest`-based client for the `/api/states` endpoints
#[derive(Debug)]
pub struct HomeAssistantRestClient {
    client: Client,
    config: HomeAssistantConfig,
}

impl HomeAssistantRestClient {
    /// Create a new Home Assistant client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &HomeAssistantConfig) -> Result<Self, HomeAssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("hafas-sensor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HomeAssistantError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn state_url(&self, entity_id: &EntityId) -> String {
        format!("{}/api/states/{entity_id}", self.config.api_base())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, HomeAssistantError> {
        request
            .bearer_auth(self.config.token_str())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HomeAssistantError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    HomeAssistantError::ConnectionFailed(e.to_string())
                }
            })
    }

    /// Map error statuses; `resource` names what a 404 refers to
    fn check_status(resource: &str, response: Response) -> Result<Response, HomeAssistantError> {
        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => Err(HomeAssistantError::EntityNotFound(resource.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(HomeAssistantError::Unauthorized {
                    status: status.as_u16(),
                })
            },
            s if !s.is_success() => Err(HomeAssistantError::RequestFailed(format!("HTTP {s}"))),
            _ => Ok(response),
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, HomeAssistantError> {
        let body = response
            .text()
            .await
            .map_err(|e| HomeAssistantError::ParseError(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| HomeAssistantError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl HomeAssistantClient for HomeAssistantRestClient {
    #[instrument(skip(self), fields(entity_id = %entity_id))]
    async fn get_state(&self, entity_id: &EntityId) -> Result<EntityState, HomeAssistantError> {
        let response = self.send(self.client.get(self.state_url(entity_id))).await?;
        let state: EntityState =
            Self::read_json(Self::check_status(&entity_id.to_string(), response)?).await?;
        debug!(state = %state.state, "Entity state read");
        Ok(state)
    }

    #[instrument(skip(self, update), fields(entity_id = %entity_id, state = %update.state))]
    async fn set_state(
        &self,
        entity_id: &EntityId,
        update: &StateUpdate,
    ) -> Result<EntityState, HomeAssistantError> {
        let response = self
            .send(self.client.post(self.state_url(entity_id)).json(update))
            .await?;
        let state: EntityState =
            Self::read_json(Self::check_status(&entity_id.to_string(), response)?).await?;
        debug!("Entity state written");
        Ok(state)
    }

    #[instrument(skip(self))]
    async fn get_config(&self) -> Result<CoreConfig, HomeAssistantError> {
        let url = format!("{}/api/config", self.config.api_base());
        let response = self.send(self.client.get(url)).await?;
        let core: CoreConfig = Self::read_json(Self::check_status("api/config", response)?).await?;
        debug!(location = ?core.location_name, "Core config read");
        Ok(core)
    }
}
