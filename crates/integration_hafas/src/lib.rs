//! HaFAS trip search integration
//!
//! Talks to the `/trip` endpoint of a HaFAS REST gateway (for example the
//! AVV or RMV open-data gateways) using bearer-token authentication.
//!
//! # Architecture
//!
//! [`HafasClient`] defines the interface for trip search, implemented by
//! [`HafasTripClient`]. Responses are returned as the raw [`TripResponse`]
//! document; turning legs into sensor connections happens in the
//! infrastructure adapter.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::GeoLocation;
//! use integration_hafas::{HafasClient, HafasConfig, HafasTripClient};
//!
//! let config = HafasConfig::new("https://hafas.example.org/restproxy", "secret-key");
//! let client = HafasTripClient::new(&config)?;
//!
//! let origin = GeoLocation::new(50.7753, 6.0839)?;
//! let destination = GeoLocation::new(50.7680, 6.0910)?;
//! let response = client.trip(&origin, &destination).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{HafasClient, HafasTripClient};
pub use config::HafasConfig;
pub use error::HafasError;
pub use models::{Leg, LegList, Platform, StopEvent, Trip, TripResponse};
