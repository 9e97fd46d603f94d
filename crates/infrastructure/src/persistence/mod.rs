//! Persistence module
//!
//! TOML-file storage for the configured sensor entries.

mod sensor_store;

pub use sensor_store::{SensorStore, SensorStoreError};
