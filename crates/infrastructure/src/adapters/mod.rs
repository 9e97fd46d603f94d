//! Infrastructure adapters
//!
//! Adapters connect application ports to the HaFAS and Home Assistant clients.

mod hafas_journey_adapter;
mod home_assistant_schedule_adapter;
mod home_assistant_sensor_publisher;

pub use hafas_journey_adapter::HafasJourneyAdapter;
pub use home_assistant_schedule_adapter::HomeAssistantScheduleAdapter;
pub use home_assistant_sensor_publisher::{
    HomeAssistantSensorPublisher, SENSOR_DEVICE_CLASS, SENSOR_ICON,
};
