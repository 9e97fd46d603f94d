//! Domain entities - Objects with identity and lifecycle

mod connection;
mod sensor_state;

pub use connection::{Connection, ConnectionLeg, next_departure};
pub use sensor_state::{QUERY_SLACK_SECS, SensorState, UNKNOWN_STATE};
