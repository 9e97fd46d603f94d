//! Application services

mod departure_sensor_service;
mod setup_flow;

pub use departure_sensor_service::{DepartureSensorService, UpdateOutcome};
pub use setup_flow::{SetupDefaults, SetupFlow, SetupOutcome, SetupStep, UserStepInput};
