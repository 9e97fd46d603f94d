//! Departure sensor update routine
//!
//! Runs once per host tick. Queries are gated by the linked schedule entity
//! and rate-limited to the configured interval; failures keep the previous
//! rendering in place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::SensorState;
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::ports::{JourneyPort, SchedulePort, SensorPublisherPort};
use crate::sensor_config::SensorConfig;

/// What a single update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Schedule state could not be read; nothing changed
    ScheduleUnavailable,
    /// Schedule is off; no query was made
    Inactive,
    /// Interval has not elapsed since the last query
    NotDue,
    /// Connections were replaced
    Updated {
        /// Number of connections now shown
        connections: usize,
    },
    /// Gateway returned no trips; previous connections kept
    Empty,
    /// Query failed; previous connections kept
    Failed,
}

/// Keeps one sensor's state up to date
pub struct DepartureSensorService {
    sensor: SensorConfig,
    journeys: Arc<dyn JourneyPort>,
    schedule: Arc<dyn SchedulePort>,
    publisher: Arc<dyn SensorPublisherPort>,
    state: RwLock<SensorState>,
}

impl std::fmt::Debug for DepartureSensorService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepartureSensorService")
            .field("sensor", &self.sensor)
            .field("journeys", &"<JourneyPort>")
            .field("schedule", &"<SchedulePort>")
            .field("publisher", &"<SensorPublisherPort>")
            .field("state", &*self.state.read())
            .finish()
    }
}

impl DepartureSensorService {
    /// Create a service with an empty initial state
    #[must_use]
    pub fn new(
        sensor: SensorConfig,
        journeys: Arc<dyn JourneyPort>,
        schedule: Arc<dyn SchedulePort>,
        publisher: Arc<dyn SensorPublisherPort>,
    ) -> Self {
        Self {
            sensor,
            journeys,
            schedule,
            publisher,
            state: RwLock::new(SensorState::default()),
        }
    }

    /// The sensor this service updates
    #[must_use]
    pub const fn sensor(&self) -> &SensorConfig {
        &self.sensor
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> SensorState {
        self.state.read().clone()
    }

    /// Run one update cycle now
    pub async fn update(&self) -> UpdateOutcome {
        self.update_at(Utc::now()).await
    }

    /// Run one update cycle as if the current time were `now`
    #[instrument(skip(self), fields(unique_id = %self.sensor.unique_id, name = %self.sensor.name))]
    pub async fn update_at(&self, now: DateTime<Utc>) -> UpdateOutcome {
        let active = match self.schedule.is_on(&self.sensor.schedule).await {
            Ok(active) => active,
            Err(e) => {
                warn!(
                    unique_id = %self.sensor.unique_id,
                    schedule = %self.sensor.schedule,
                    error = %e,
                    "Couldn't read schedule state"
                );
                return UpdateOutcome::ScheduleUnavailable;
            },
        };
        self.state.write().active = active;

        let outcome = if !active {
            debug!("Schedule is off, skipping query");
            UpdateOutcome::Inactive
        } else if !self.is_query_due(now) {
            debug!("Query not due yet");
            UpdateOutcome::NotDue
        } else {
            self.refresh(now).await
        };

        self.publish().await;
        outcome
    }

    fn is_query_due(&self, now: DateTime<Utc>) -> bool {
        self.state.read().is_query_due(now, self.sensor.interval())
    }

    async fn refresh(&self, now: DateTime<Utc>) -> UpdateOutcome {
        let result = self
            .journeys
            .connections(&self.sensor.origin, &self.sensor.destination)
            .await;

        match result {
            Ok(connections) if connections.is_empty() => {
                warn!(unique_id = %self.sensor.unique_id, "Journeys empty");
                UpdateOutcome::Empty
            },
            Ok(connections) => {
                let count = connections.len();
                let mut state = self.state.write();
                state.record_connections(connections, now);
                info!(
                    connections = count,
                    next_departure = %state.state_value(),
                    "Connections updated"
                );
                UpdateOutcome::Updated { connections: count }
            },
            Err(e) => {
                warn!(
                    unique_id = %self.sensor.unique_id,
                    error = %e,
                    "Couldn't fetch journeys"
                );
                UpdateOutcome::Failed
            },
        }
    }

    async fn publish(&self) {
        let snapshot = self.state();
        if let Err(e) = self.publisher.publish(&self.sensor, &snapshot).await {
            warn!(
                unique_id = %self.sensor.unique_id,
                error = %e,
                "Couldn't publish sensor state"
            );
        }
    }
}
