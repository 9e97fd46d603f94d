//! Configured departure sensor

use chrono::TimeDelta;
use domain::{EntityId, GeoLocation, SensorId};
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Polling interval offered by the setup wizard
pub const DEFAULT_INTERVAL_MINUTES: u32 = 5;

/// One departure sensor: a route, a polling interval and the schedule gating it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Stable id, kept across reconfiguration
    #[serde(default)]
    pub unique_id: SensorId,
    /// Human-readable name; also determines the sensor entity id
    pub name: String,
    /// Minutes between queries
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
    /// Schedule entity that must be on for queries to run
    pub schedule: EntityId,
    /// Trip origin
    pub origin: GeoLocation,
    /// Trip destination
    pub destination: GeoLocation,
}

const fn default_interval_minutes() -> u32 {
    DEFAULT_INTERVAL_MINUTES
}

impl SensorConfig {
    /// Polling interval
    #[must_use]
    pub fn interval(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.interval_minutes))
    }

    /// Entity id the sensor is published under
    pub fn entity_id(&self) -> Result<EntityId, ApplicationError> {
        Ok(EntityId::sensor_for_name(&self.name)?)
    }

    /// Validate the entry
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name, a zero interval or a
    /// schedule outside the `schedule` domain.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        validate_user_step(&self.name, self.interval_minutes, &self.schedule)?;
        self.entity_id()?;
        Ok(())
    }
}

/// Checks shared by [`SensorConfig::validate`] and the first wizard step
pub(crate) fn validate_user_step(
    name: &str,
    interval_minutes: u32,
    schedule: &EntityId,
) -> Result<(), ApplicationError> {
    if name.trim().is_empty() {
        return Err(ApplicationError::Validation(
            "name must not be empty".to_string(),
        ));
    }

    if interval_minutes < 1 {
        return Err(ApplicationError::Validation(
            "interval must be at least 1 minute".to_string(),
        ));
    }

    if !schedule.is_in_domain(EntityId::SCHEDULE_DOMAIN) {
        return Err(ApplicationError::Validation(format!(
            "{schedule} is not a schedule entity"
        )));
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sensor_config() -> SensorConfig {
        SensorConfig {
            unique_id: SensorId::new(),
            name: "To Work".to_string(),
            interval_minutes: 5,
            schedule: "schedule.commute".parse().unwrap(),
            origin: GeoLocation::new(50.7753, 6.0839).unwrap(),
            destination: GeoLocation::new(50.768, 6.091).unwrap(),
        }
    }
}
