//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod journey_port;
mod schedule_port;
mod sensor_publisher_port;

pub use journey_port::JourneyPort;
#[cfg(test)]
pub use journey_port::MockJourneyPort;
pub use schedule_port::SchedulePort;
#[cfg(test)]
pub use schedule_port::MockSchedulePort;
pub use sensor_publisher_port::SensorPublisherPort;
#[cfg(test)]
pub use sensor_publisher_port::MockSensorPublisherPort;
