//! Home Assistant state documents

use chrono::{DateTime, Utc};
use domain::{GeoLocation, InvalidCoordinates};
use serde::{Deserialize, Serialize};

/// State string of an active schedule (and any other on/off entity)
pub const STATE_ON: &str = "on";

/// State string of an inactive schedule
pub const STATE_OFF: &str = "off";

/// An entity state as returned by `GET /api/states/<entity_id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// The entity id
    pub entity_id: String,
    /// State string
    pub state: String,
    /// Entity attributes
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// When the state last changed
    #[serde(default)]
    pub last_changed: Option<DateTime<Utc>>,
    /// When the state or attributes last changed
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl EntityState {
    /// Whether the state is `on`
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state == STATE_ON
    }
}

/// Body of `POST /api/states/<entity_id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    /// New state string
    pub state: String,
    /// Attributes to attach
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Subset of `GET /api/config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Home latitude
    pub latitude: f64,
    /// Home longitude
    pub longitude: f64,
    /// Name of the installation
    #[serde(default)]
    pub location_name: Option<String>,
    /// IANA zone of the installation
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Core version
    #[serde(default)]
    pub version: Option<String>,
}

impl CoreConfig {
    /// The configured home location
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of range.
    pub fn home(&self) -> Result<GeoLocation, InvalidCoordinates> {
        GeoLocation::new(self.latitude, self.longitude)
    }
}
