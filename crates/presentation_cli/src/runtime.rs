//! Service wiring and the polling loop

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{DepartureSensorService, JourneyPort, SensorConfig};
use domain::GeoLocation;
use infrastructure::{
    AppConfig, HafasJourneyAdapter, HomeAssistantScheduleAdapter, HomeAssistantSensorPublisher,
};
use integration_homeassistant::{HomeAssistantClient, HomeAssistantRestClient};
use tokio::signal;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Adapters shared by all sensors of one process
pub struct Adapters {
    pub journeys: Arc<HafasJourneyAdapter>,
    pub home_assistant: Arc<dyn HomeAssistantClient>,
}

impl std::fmt::Debug for Adapters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapters")
            .field("journeys", &self.journeys)
            .field("home_assistant", &"dyn HomeAssistantClient")
            .finish()
    }
}

impl Adapters {
    /// Build the HaFAS and Home Assistant adapters from the configuration
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let journeys = HafasJourneyAdapter::new(&config.hafas)?;
        journeys
            .validate_connection()
            .await
            .context("HaFAS settings are unusable")?;

        let home_assistant = HomeAssistantRestClient::new(&config.home_assistant)?;

        Ok(Self {
            journeys: Arc::new(journeys),
            home_assistant: Arc::new(home_assistant),
        })
    }

    /// Journey port for one-off trip queries
    pub fn journey_port(&self) -> Arc<dyn JourneyPort> {
        self.journeys.clone()
    }

    /// Update service for one sensor
    pub fn service(&self, sensor: SensorConfig) -> DepartureSensorService {
        DepartureSensorService::new(
            sensor,
            self.journeys.clone(),
            Arc::new(HomeAssistantScheduleAdapter::new(
                self.home_assistant.clone(),
            )),
            Arc::new(HomeAssistantSensorPublisher::new(
                self.home_assistant.clone(),
            )),
        )
    }

    /// Home location from the config file, otherwise from Home Assistant
    pub async fn home_location(&self, config: &AppConfig) -> anyhow::Result<GeoLocation> {
        if let Some(home) = config.home_location() {
            return Ok(home);
        }

        let core = self
            .home_assistant
            .get_config()
            .await
            .context("Couldn't read the home location from Home Assistant")?;
        Ok(core.home()?)
    }
}

/// Spawn the update loop of one sensor
///
/// The first update runs immediately. Returns a `JoinHandle` that is
/// aborted on shutdown.
pub fn spawn_sensor_task(service: Arc<DepartureSensorService>, tick: Duration) -> JoinHandle<()> {
    info!(
        name = %service.sensor().name,
        unique_id = %service.sensor().unique_id,
        tick_secs = tick.as_secs(),
        "Starting sensor task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let outcome = service.update().await;
            debug!(name = %service.sensor().name, ?outcome, "Update finished");
        }
    })
}

/// Wait for Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}

/// Run all sensors until a shutdown signal arrives
pub async fn run(config: &AppConfig, sensors: Vec<SensorConfig>) -> anyhow::Result<()> {
    let adapters = Adapters::from_config(config).await?;
    let tick = config.tick_interval();

    let handles: Vec<JoinHandle<()>> = sensors
        .into_iter()
        .map(|sensor| spawn_sensor_task(Arc::new(adapters.service(sensor)), tick))
        .collect();

    info!(sensors = handles.len(), "Polling started");
    shutdown_signal().await;

    for handle in &handles {
        handle.abort();
    }
    info!("Stopped");
    Ok(())
}
