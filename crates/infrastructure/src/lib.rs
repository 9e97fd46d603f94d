//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the HaFAS and Home Assistant
//! clients, and provides configuration loading, the sensors file and logging
//! setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, LogFormat, LoggingConfig};
pub use persistence::{SensorStore, SensorStoreError};
pub use telemetry::{TelemetryError, init_logging};
