//! hafas-sensor
//!
//! Publishes the next departures between two locations as Home Assistant
//! sensors.

#![allow(clippy::print_stdout)]

mod runtime;
mod setup;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, bail};
use application::{SetupFlow, UpdateOutcome};
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, LogFormat, SensorStore, init_logging};
use tracing::warn;

use crate::runtime::Adapters;

/// hafas-sensor CLI
#[derive(Parser)]
#[command(name = "hafas-sensor")]
#[command(author, version, about = "HaFAS departure sensors for Home Assistant", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config.toml
    #[arg(short, long, global = true, env = "HAFAS_SENSOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll all configured sensors until interrupted
    Run,

    /// Run a single update cycle for one sensor and print its state
    Update {
        /// Sensor name
        name: String,
    },

    /// Query connections for one sensor without touching Home Assistant
    Trip {
        /// Sensor name
        name: String,
    },

    /// Add a sensor, or change an existing one
    ///
    /// Example: hafas-sensor setup --reconfigure "To Work"
    Setup {
        /// Name of the sensor to change
        #[arg(long)]
        reconfigure: Option<String>,
    },

    /// Validate configuration and sensor entries
    Check,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Describe an update outcome for the terminal
const fn describe_outcome(outcome: UpdateOutcome) -> &'static str {
    match outcome {
        UpdateOutcome::ScheduleUnavailable => "schedule entity unavailable, state unchanged",
        UpdateOutcome::Inactive => "schedule is off, no query made",
        UpdateOutcome::NotDue => "interval not elapsed, no query made",
        UpdateOutcome::Updated { .. } => "connections updated",
        UpdateOutcome::Empty => "no connections found, state unchanged",
        UpdateOutcome::Failed => "query failed, state unchanged",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref());

    let (filter, format) = match &config {
        Ok(config) if cli.verbose == 0 => {
            (config.logging.log_filter.as_str(), config.logging.log_format)
        },
        Ok(config) => (log_filter_from_verbosity(cli.verbose), config.logging.log_format),
        Err(_) => (log_filter_from_verbosity(cli.verbose), LogFormat::Text),
    };
    init_logging(filter, format)?;

    let config = config.context("Failed to load configuration")?;
    config.validate()?;
    let store = SensorStore::new(config.sensors_file.clone());

    match cli.command {
        Commands::Run => {
            let sensors = store.load()?;
            if sensors.is_empty() {
                bail!(
                    "No sensors in {}, add one with `hafas-sensor setup`",
                    store.path().display()
                );
            }
            runtime::run(&config, sensors).await?;
        },

        Commands::Update { name } => {
            let sensor = store.find_by_name(&name)?;
            let adapters = Adapters::from_config(&config).await?;
            let service = adapters.service(sensor);

            let outcome = service.update().await;
            println!("{name}: {}", describe_outcome(outcome));
            println!("{}", serde_json::to_string_pretty(&service.state())?);
        },

        Commands::Trip { name } => {
            let sensor = store.find_by_name(&name)?;
            let adapters = Adapters::from_config(&config).await?;

            let connections = adapters
                .journey_port()
                .connections(&sensor.origin, &sensor.destination)
                .await?;
            println!("{}", serde_json::to_string_pretty(&connections)?);
        },

        Commands::Setup { reconfigure } => {
            let adapters = Adapters::from_config(&config).await?;
            let home = adapters.home_location(&config).await?;

            let flow = match reconfigure {
                Some(name) => SetupFlow::reconfigure(store.find_by_name(&name)?, home),
                None => SetupFlow::new(home),
            };

            let stdin = io::stdin();
            let outcome = setup::run_wizard(flow, &mut stdin.lock(), &mut io::stdout())?;
            let sensor = outcome.config().clone();
            store.upsert(sensor.clone())?;

            println!();
            println!(
                "Saved {} ({}) to {}",
                sensor.name,
                sensor.entity_id()?,
                store.path().display()
            );
        },

        Commands::Check => {
            let sensors = store.load()?;
            println!("Configuration OK");
            println!("  HaFAS host:     {}", config.hafas.host);
            println!("  Home Assistant: {}", config.home_assistant.base_url);
            println!("  Sensor file:    {}", store.path().display());

            if sensors.is_empty() {
                warn!("No sensors configured");
            }
            for sensor in &sensors {
                println!(
                    "  - {} ({}) every {} min, gated by {}",
                    sensor.name,
                    sensor.entity_id()?,
                    sensor.interval_minutes,
                    sensor.schedule
                );
            }
        },
    }

    Ok(())
}
