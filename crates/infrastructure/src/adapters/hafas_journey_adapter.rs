//! Journey adapter - Implements JourneyPort using integration_hafas

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::JourneyPort;
use async_trait::async_trait;
use chrono_tz::Tz;
use domain::{
    Connection, ConnectionLeg, Delay, DomainError, GeoLocation, TransportMode,
    parse_optional_zoned, parse_time_zone, parse_zoned,
};
use integration_hafas::{HafasClient, HafasConfig, HafasError, HafasTripClient, Leg, StopEvent, TripResponse};
use tracing::{debug, instrument};

/// Adapter turning HaFAS trip documents into sensor connections
pub struct HafasJourneyAdapter {
    client: Arc<dyn HafasClient>,
    time_zone: Tz,
}

impl std::fmt::Debug for HafasJourneyAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HafasJourneyAdapter")
            .field("client", &"dyn HafasClient")
            .field("time_zone", &self.time_zone.name())
            .finish()
    }
}

impl HafasJourneyAdapter {
    /// Create an adapter backed by the reqwest client
    ///
    /// # Errors
    ///
    /// Returns an error if the zone is unknown or the HTTP client fails to
    /// initialize.
    pub fn new(config: &HafasConfig) -> Result<Self, ApplicationError> {
        let time_zone = parse_time_zone(&config.time_zone)?;
        let client = HafasTripClient::new(config).map_err(map_hafas_error)?;
        Ok(Self::with_client(Arc::new(client), time_zone))
    }

    /// Create an adapter around an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn HafasClient>, time_zone: Tz) -> Self {
        Self { client, time_zone }
    }

    /// Check the gateway settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error when host or key are unusable.
    pub async fn validate_connection(&self) -> Result<(), ApplicationError> {
        self.client
            .validate_connection()
            .await
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }

    /// Convert every trip into a connection
    ///
    /// Fails as a whole if any leg carries an unparseable time.
    pub fn transform(response: &TripResponse, tz: Tz) -> Result<Vec<Connection>, DomainError> {
        response
            .trips
            .iter()
            .map(|trip| {
                trip.legs()
                    .iter()
                    .map(|leg| convert_leg(leg, tz))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Connection::new)
            })
            .collect()
    }
}

fn convert_leg(leg: &Leg, tz: Tz) -> Result<ConnectionLeg, DomainError> {
    let (departure, delay) = scheduled_and_delay(&leg.origin, tz)?;
    let (arrival, delay_arrival) = scheduled_and_delay(&leg.destination, tz)?;

    Ok(ConnectionLeg {
        origin: leg.origin.name.clone(),
        departure,
        platform: leg.origin.platform_text().map(str::to_string),
        delay,
        destination: leg.destination.name.clone(),
        arrival,
        platform_arrival: leg.destination.platform_text().map(str::to_string),
        delay_arrival,
        mode: TransportMode::classify(&leg.leg_type, leg.category.as_deref()),
        name: leg.display_name().map(str::to_string),
    })
}

fn scheduled_and_delay(
    stop: &StopEvent,
    tz: Tz,
) -> Result<(chrono::DateTime<chrono::FixedOffset>, Delay), DomainError> {
    let scheduled = parse_zoned(&stop.date, &stop.time, tz)?;
    let realtime = parse_optional_zoned(stop.rt_date.as_deref(), stop.realtime_time(), tz)?;
    Ok((scheduled, Delay::between(scheduled, realtime)))
}

/// Map a HaFAS client error to an application error
pub(crate) fn map_hafas_error(e: HafasError) -> ApplicationError {
    match e {
        HafasError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(format!("HaFAS request failed: {other}")),
    }
}

#[async_trait]
impl JourneyPort for HafasJourneyAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn connections(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<Vec<Connection>, ApplicationError> {
        let response = self
            .client
            .trip(origin, destination)
            .await
            .map_err(map_hafas_error)?;

        let connections = Self::transform(&response, self.time_zone).map_err(|e| {
            ApplicationError::ExternalService(format!("Malformed trip document: {e}"))
        })?;

        debug!(count = connections.len(), "Converted trips");
        Ok(connections)
    }
}
