//! Value Objects - Immutable, identity-less domain primitives

mod delay;
mod entity_id;
mod geo_location;
mod sensor_id;
mod transport_mode;

pub use delay::Delay;
pub use entity_id::EntityId;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use sensor_id::SensorId;
pub use transport_mode::{TRAIN_CATEGORIES, TransportMode};
