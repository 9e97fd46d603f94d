//! Domain layer for the HaFAS departure sensor
//!
//! Contains the journey-to-sensor vocabulary: connections and their legs,
//! signed delays, transport mode classification, zoned timestamp parsing
//! and the sensor state with its query rate limit.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod time;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use time::{DEFAULT_TIME_ZONE, parse_optional_zoned, parse_time_zone, parse_zoned};
pub use value_objects::*;
