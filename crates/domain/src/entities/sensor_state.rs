//! Departure sensor state

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::connection::{Connection, next_departure};

/// Queries may run this many seconds early
///
/// The host tick is not exact; without slack a query could slip a whole tick.
pub const QUERY_SLACK_SECS: i64 = 10;

/// Value Home Assistant shows for a sensor without a value
pub const UNKNOWN_STATE: &str = "unknown";

/// What the sensor currently shows
///
/// Rebuilt from the journey response on each successful query. Between
/// queries the previous rendering stays in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorState {
    /// Next expected departure
    pub native_value: Option<DateTime<FixedOffset>>,
    /// Connections from the last successful query
    pub connections: Vec<Connection>,
    /// Whether the linked schedule is on
    pub active: bool,
    /// Time of the last successful query
    pub last_query: DateTime<Utc>,
}

impl Default for SensorState {
    fn default() -> Self {
        Self {
            native_value: None,
            connections: Vec::new(),
            active: true,
            last_query: DateTime::<Utc>::default(),
        }
    }
}

impl SensorState {
    /// Whether a new query is due at `now` for the given polling interval
    #[must_use]
    pub fn is_query_due(&self, now: DateTime<Utc>, interval: TimeDelta) -> bool {
        let due_at = self.last_query + interval - TimeDelta::seconds(QUERY_SLACK_SECS);
        now >= due_at
    }

    /// Replace the connections after a successful query
    pub fn record_connections(&mut self, connections: Vec<Connection>, queried_at: DateTime<Utc>) {
        self.native_value = next_departure(&connections);
        self.connections = connections;
        self.last_query = queried_at;
    }

    /// State string as published to Home Assistant
    #[must_use]
    pub fn state_value(&self) -> String {
        self.native_value
            .map_or_else(|| UNKNOWN_STATE.to_string(), |dt| dt.to_rfc3339())
    }
}
