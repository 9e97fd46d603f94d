//! Home Assistant REST integration
//!
//! Reads and writes entity states through the `/api/states` endpoints using a
//! long-lived access token.
//!
//! [`HomeAssistantClient`] defines the interface, implemented by
//! [`HomeAssistantRestClient`].

mod client;
mod config;
mod error;
mod models;

pub use client::{HomeAssistantClient, HomeAssistantRestClient};
pub use config::HomeAssistantConfig;
pub use error::HomeAssistantError;
pub use models::{CoreConfig, EntityState, STATE_OFF, STATE_ON, StateUpdate};
