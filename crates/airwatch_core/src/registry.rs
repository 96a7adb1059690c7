use crate::Station;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Station list is empty")]
    Empty,
    #[error("Station {name:?} has coordinates out of range ({lat}, {lon})")]
    InvalidCoordinates { name: String, lat: f64, lon: f64 },
    #[error("Station {name:?} has a baseline AQI of {baseline_aqi}, above 500")]
    InvalidBaseline { name: String, baseline_aqi: u16 },
    #[error("Could not parse station list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The fixed, ordered set of stations served by the dashboard.
///
/// Built once at startup and shared read-only for the lifetime of the
/// process.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    pub fn new(stations: Vec<Station>) -> Result<Self, RegistryError> {
        if stations.is_empty() {
            return Err(RegistryError::Empty);
        }
        for station in &stations {
            if !(-90.0..=90.0).contains(&station.lat) || !(-180.0..=180.0).contains(&station.lon)
            {
                return Err(RegistryError::InvalidCoordinates {
                    name: station.name.clone(),
                    lat: station.lat,
                    lon: station.lon,
                });
            }
            if station.baseline_aqi > crate::AQI_MAX {
                return Err(RegistryError::InvalidBaseline {
                    name: station.name.clone(),
                    baseline_aqi: station.baseline_aqi,
                });
            }
        }
        Ok(StationRegistry { stations })
    }

    /// Parse a camelCase JSON array of stations.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let stations: Vec<Station> = serde_json::from_str(json)?;
        tracing::debug!("Parsed {} stations", stations.len());
        Self::new(stations)
    }

    /// The five stations around central Nairobi.
    pub fn default_nairobi() -> Self {
        StationRegistry {
            stations: vec![
                Station::new("City Centre Station", -1.285, 36.820, 55),
                Station::new("Eastlands Monitoring", -1.300, 36.880, 120),
                Station::new("Langata Road Sensor", -1.350, 36.780, 25),
                Station::new("Westlands Area", -1.265, 36.790, 210),
                Station::new("North Suburb Monitoring (Gigiri)", -1.210, 36.835, 85),
            ],
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationRegistry {
    fn default() -> Self {
        Self::default_nairobi()
    }
}
