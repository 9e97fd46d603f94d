//! Sensor identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable unique id of a configured departure sensor
///
/// Survives reconfiguration, so Home Assistant keeps treating the entity as
/// the same one when its name or route changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(Uuid);

impl SensorId {
    /// Create a new random sensor ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a sensor ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SensorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SensorId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
