//! Application layer - Use cases and orchestration
//!
//! Contains the sensor update routine, the setup wizard flow and the port
//! definitions the infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod sensor_config;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use sensor_config::SensorConfig;
pub use services::*;
