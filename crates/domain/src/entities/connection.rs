//! Connections shown on the departure sensor

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Delay, TransportMode};

/// One leg of a connection, flattened for display
///
/// Field names are the attribute keys dashboards read from the sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionLeg {
    /// Name of the stop the leg starts at
    pub origin: String,
    /// Scheduled departure
    pub departure: DateTime<FixedOffset>,
    /// Departure platform, real-time if known
    pub platform: Option<String>,
    /// Departure delay
    pub delay: Delay,
    /// Name of the stop the leg ends at
    pub destination: String,
    /// Scheduled arrival
    pub arrival: DateTime<FixedOffset>,
    /// Arrival platform, real-time if known
    pub platform_arrival: Option<String>,
    /// Arrival delay
    pub delay_arrival: Delay,
    /// How the leg is travelled
    pub mode: TransportMode,
    /// Line number or name (e.g. "S6", "Bus 35")
    pub name: Option<String>,
}

impl ConnectionLeg {
    /// Departure including the current delay
    #[must_use]
    pub fn expected_departure(&self) -> DateTime<FixedOffset> {
        self.departure + self.delay.as_time_delta()
    }

    /// Arrival including the current delay
    #[must_use]
    pub fn expected_arrival(&self) -> DateTime<FixedOffset> {
        self.arrival + self.delay_arrival.as_time_delta()
    }
}

/// A trip from origin to destination as a list of legs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Legs in travel order
    pub legs: Vec<ConnectionLeg>,
}

impl Connection {
    /// Create a connection from its legs
    #[must_use]
    pub const fn new(legs: Vec<ConnectionLeg>) -> Self {
        Self { legs }
    }
}

/// The next departure: the first leg of the first connection that has one
///
/// Returns the leg's scheduled departure shifted by its delay.
#[must_use]
pub fn next_departure(connections: &[Connection]) -> Option<DateTime<FixedOffset>> {
    connections
        .iter()
        .flat_map(|c| c.legs.iter())
        .next()
        .map(ConnectionLeg::expected_departure)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::time::{DEFAULT_TIME_ZONE, parse_zoned};

    pub fn leg(departure: &str, delay_secs: i64, mode: TransportMode) -> ConnectionLeg {
        let departure = parse_zoned("2024-07-01", departure, DEFAULT_TIME_ZONE).unwrap();
        ConnectionLeg {
            origin: "Aachen Bushof".to_string(),
            departure,
            platform: Some("H.1".to_string()),
            delay: Delay::from_seconds(delay_secs),
            destination: "Aachen Hbf".to_string(),
            arrival: departure + chrono::TimeDelta::minutes(12),
            platform_arrival: None,
            delay_arrival: Delay::ZERO,
            mode,
            name: Some("35".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::leg;
    use super::*;

    #[test]
    fn next_departure_uses_first_leg_and_delay() {
        let connections = vec![
            Connection::new(vec![leg("10:00:00", 120, TransportMode::Bus)]),
            Connection::new(vec![leg("10:20:00", 0, TransportMode::Bus)]),
        ];
        let next = next_departure(&connections).unwrap();
        assert_eq!(next.to_rfc3339(), "2024-07-01T10:02:00+02:00");
    }

    #[test]
    fn next_departure_skips_empty_connections() {
        let connections = vec![
            Connection::default(),
            Connection::new(vec![leg("10:20:00", -60, TransportMode::Train)]),
        ];
        let next = next_departure(&connections).unwrap();
        assert_eq!(next.to_rfc3339(), "2024-07-01T10:19:00+02:00");
    }

    #[test]
    fn next_departure_none_without_legs() {
        assert!(next_departure(&[]).is_none());
        assert!(next_departure(&[Connection::default()]).is_none());
    }

    #[test]
    fn leg_serializes_with_attribute_keys() {
        let json = serde_json::to_value(leg("10:00:00", 90, TransportMode::Walking)).unwrap();
        assert_eq!(json["departure"], "2024-07-01T10:00:00+02:00");
        assert_eq!(json["delay"], "00:01:30");
        assert_eq!(json["delay_arrival"], "00:00:00");
        assert_eq!(json["mode"], "walking");
        assert_eq!(json["platform_arrival"], serde_json::Value::Null);
    }
}
