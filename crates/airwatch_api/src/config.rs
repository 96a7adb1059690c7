use airwatch_core::{RegistryError, StationRegistry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read station file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid station file '{}': {source}", path.display())]
    Registry {
        path: PathBuf,
        source: RegistryError,
    },
}

/// Initial view of the dashboard map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        // Central Nairobi
        MapSettings {
            center_lat: -1.2833,
            center_lon: 36.8167,
            zoom: 12,
        }
    }
}

/// Load the station registry from a JSON file, or use the built-in one.
pub async fn load_registry(path: Option<&Path>) -> Result<StationRegistry, ConfigError> {
    let Some(path) = path else {
        return Ok(StationRegistry::default());
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let registry = StationRegistry::from_json(&content).map_err(|source| ConfigError::Registry {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Loaded {} stations from {}", registry.len(), path.display());
    Ok(registry)
}
