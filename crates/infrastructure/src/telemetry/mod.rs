//! Logging infrastructure
//!
//! Console logging through `tracing-subscriber`, as text or JSON lines.

mod logging;

pub use logging::{TelemetryError, init_logging};
