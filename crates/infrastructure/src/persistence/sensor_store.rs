//! File-backed sensor entries
//!
//! Entries are kept as `[[sensors]]` tables in their own TOML file so the
//! setup wizard can rewrite it without touching the credentials in
//! `config.toml`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use application::SensorConfig;
use domain::EntityId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors of the sensor store
#[derive(Debug, Error)]
pub enum SensorStoreError {
    /// Failed to read or write the file
    #[error("Sensor file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse sensor file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize sensors: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// An entry is invalid or clashes with another
    #[error("Invalid sensor entry: {0}")]
    Invalid(String),

    /// No entry with that name
    #[error("No sensor named '{0}'")]
    NotFound(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SensorsFile {
    #[serde(default)]
    sensors: Vec<SensorConfig>,
}

/// Reads and writes the sensors file
#[derive(Debug, Clone)]
pub struct SensorStore {
    path: PathBuf,
}

impl SensorStore {
    /// Create a store for the given file; it need not exist yet
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the sensors file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate all entries
    ///
    /// A missing file holds no entries.
    pub fn load(&self) -> Result<Vec<SensorConfig>, SensorStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Sensor file does not exist yet");
                return Ok(Vec::new());
            },
            Err(e) => return Err(e.into()),
        };

        let file: SensorsFile = toml::from_str(&content)?;
        validate_entries(&file.sensors)?;
        Ok(file.sensors)
    }

    /// Replace the file with `sensors`
    ///
    /// Writes a sibling temp file first and renames it over the target.
    pub fn save(&self, sensors: &[SensorConfig]) -> Result<(), SensorStoreError> {
        validate_entries(sensors)?;

        let output = toml::to_string_pretty(&SensorsFile {
            sensors: sensors.to_vec(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, output)?;
        fs::rename(&tmp, &self.path)?;

        info!(path = %self.path.display(), count = sensors.len(), "Sensors saved");
        Ok(())
    }

    /// Insert a new entry or replace the one with the same unique id
    ///
    /// Returns all entries after the change.
    pub fn upsert(&self, sensor: SensorConfig) -> Result<Vec<SensorConfig>, SensorStoreError> {
        let mut sensors = self.load()?;

        match sensors.iter_mut().find(|s| s.unique_id == sensor.unique_id) {
            Some(existing) => *existing = sensor,
            None => sensors.push(sensor),
        }

        self.save(&sensors)?;
        Ok(sensors)
    }

    /// Find an entry by its name
    pub fn find_by_name(&self, name: &str) -> Result<SensorConfig, SensorStoreError> {
        self.load()?
            .into_iter()
            .find(|s| s.name == name.trim())
            .ok_or_else(|| SensorStoreError::NotFound(name.to_string()))
    }
}

fn validate_entries(sensors: &[SensorConfig]) -> Result<(), SensorStoreError> {
    let mut seen: Vec<EntityId> = Vec::with_capacity(sensors.len());

    for sensor in sensors {
        sensor
            .validate()
            .map_err(|e| SensorStoreError::Invalid(format!("'{}': {e}", sensor.name)))?;

        let entity_id = sensor
            .entity_id()
            .map_err(|e| SensorStoreError::Invalid(e.to_string()))?;
        if seen.contains(&entity_id) {
            return Err(SensorStoreError::Invalid(format!(
                "'{}' maps to {entity_id}, which another sensor already uses",
                sensor.name
            )));
        }
        seen.push(entity_id);
    }

    Ok(())
}
