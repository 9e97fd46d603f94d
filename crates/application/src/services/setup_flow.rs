//! Setup wizard for departure sensors
//!
//! Three steps: name, interval and schedule first, then origin, then
//! destination. Reconfiguring an existing sensor runs the same steps with
//! the current values as defaults and keeps the sensor's unique id.

use domain::{EntityId, GeoLocation, SensorId};

use crate::error::ApplicationError;
use crate::sensor_config::{DEFAULT_INTERVAL_MINUTES, SensorConfig, validate_user_step};

/// Wizard steps in the order they are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    /// Name, interval and schedule entity
    User,
    /// Trip origin
    Origin,
    /// Trip destination
    Destination,
}

/// Input of the first step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStepInput {
    /// Sensor name
    pub name: String,
    /// Minutes between queries
    pub interval_minutes: u32,
    /// Schedule entity gating queries
    pub schedule: EntityId,
}

/// Values pre-filled in the wizard's forms
#[derive(Debug, Clone, PartialEq)]
pub struct SetupDefaults {
    /// Name; none for a new sensor
    pub name: Option<String>,
    /// Interval in minutes
    pub interval_minutes: u32,
    /// Schedule; none for a new sensor
    pub schedule: Option<EntityId>,
    /// Origin; the home location for a new sensor
    pub origin: GeoLocation,
    /// Destination; the home location for a new sensor
    pub destination: GeoLocation,
}

/// What finishing the wizard produced
#[derive(Debug, Clone, PartialEq)]
pub enum SetupOutcome {
    /// A new sensor entry
    Created(SensorConfig),
    /// An existing entry with updated values
    Updated(SensorConfig),
}

impl SetupOutcome {
    /// The resulting entry
    #[must_use]
    pub const fn config(&self) -> &SensorConfig {
        match self {
            Self::Created(config) | Self::Updated(config) => config,
        }
    }
}

/// State of one wizard run
#[derive(Debug, Clone)]
pub struct SetupFlow {
    reconfiguring: Option<SensorConfig>,
    home: GeoLocation,
    step: SetupStep,
    user: Option<UserStepInput>,
    origin: Option<GeoLocation>,
}

impl SetupFlow {
    /// Start a wizard for a new sensor
    #[must_use]
    pub const fn new(home: GeoLocation) -> Self {
        Self {
            reconfiguring: None,
            home,
            step: SetupStep::User,
            user: None,
            origin: None,
        }
    }

    /// Start a wizard that edits `existing`
    #[must_use]
    pub const fn reconfigure(existing: SensorConfig, home: GeoLocation) -> Self {
        Self {
            reconfiguring: Some(existing),
            home,
            step: SetupStep::User,
            user: None,
            origin: None,
        }
    }

    /// Whether this run edits an existing sensor
    #[must_use]
    pub const fn is_reconfiguring(&self) -> bool {
        self.reconfiguring.is_some()
    }

    /// The step waiting for input
    #[must_use]
    pub const fn step(&self) -> SetupStep {
        self.step
    }

    /// Defaults for the forms
    ///
    /// Without a default the location forms would start empty, so a new
    /// sensor gets the home location for both.
    #[must_use]
    pub fn defaults(&self) -> SetupDefaults {
        self.reconfiguring.as_ref().map_or_else(
            || SetupDefaults {
                name: None,
                interval_minutes: DEFAULT_INTERVAL_MINUTES,
                schedule: None,
                origin: self.home,
                destination: self.home,
            },
            |prev| SetupDefaults {
                name: Some(prev.name.clone()),
                interval_minutes: prev.interval_minutes,
                schedule: Some(prev.schedule.clone()),
                origin: prev.origin,
                destination: prev.destination,
            },
        )
    }

    /// Submit the first step
    ///
    /// # Errors
    ///
    /// Rejects input out of order, a blank name, a zero interval or a
    /// non-schedule entity.
    pub fn submit_user(&mut self, input: UserStepInput) -> Result<SetupStep, ApplicationError> {
        self.expect_step(SetupStep::User)?;
        validate_user_step(&input.name, input.interval_minutes, &input.schedule)?;
        EntityId::sensor_for_name(&input.name)?;

        self.user = Some(input);
        self.step = SetupStep::Origin;
        Ok(self.step)
    }

    /// Submit the origin
    ///
    /// # Errors
    ///
    /// Rejects input out of order.
    pub fn submit_origin(&mut self, origin: GeoLocation) -> Result<SetupStep, ApplicationError> {
        self.expect_step(SetupStep::Origin)?;
        self.origin = Some(origin);
        self.step = SetupStep::Destination;
        Ok(self.step)
    }

    /// Submit the destination and finish
    ///
    /// # Errors
    ///
    /// Rejects input out of order.
    pub fn submit_destination(
        &mut self,
        destination: GeoLocation,
    ) -> Result<SetupOutcome, ApplicationError> {
        self.expect_step(SetupStep::Destination)?;

        let (Some(user), Some(origin)) = (self.user.take(), self.origin.take()) else {
            return Err(ApplicationError::Internal(
                "setup flow reached the last step without earlier input".to_string(),
            ));
        };

        let unique_id = self
            .reconfiguring
            .as_ref()
            .map_or_else(SensorId::new, |prev| prev.unique_id);

        let config = SensorConfig {
            unique_id,
            name: user.name.trim().to_string(),
            interval_minutes: user.interval_minutes,
            schedule: user.schedule,
            origin,
            destination,
        };

        self.step = SetupStep::User;
        Ok(if self.reconfiguring.is_some() {
            SetupOutcome::Updated(config)
        } else {
            SetupOutcome::Created(config)
        })
    }

    fn expect_step(&self, step: SetupStep) -> Result<(), ApplicationError> {
        if self.step == step {
            Ok(())
        } else {
            Err(ApplicationError::Validation(format!(
                "expected input for {:?} step, wizard is at {:?}",
                step, self.step
            )))
        }
    }
}
