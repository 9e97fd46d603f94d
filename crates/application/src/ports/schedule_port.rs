//! Schedule lookup port

use async_trait::async_trait;
use domain::EntityId;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for reading a schedule entity's on/off state
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SchedulePort: Send + Sync {
    /// Whether the schedule is currently on
    ///
    /// A schedule that does not exist is an error, not "off".
    async fn is_on(&self, schedule: &EntityId) -> Result<bool, ApplicationError>;
}
