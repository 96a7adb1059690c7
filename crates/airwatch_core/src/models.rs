use serde::{Deserialize, Serialize};

/// Lowest value on the AQI scale.
pub const AQI_MIN: u16 = 0;
/// Highest value on the AQI scale.
pub const AQI_MAX: u16 = 500;

/// Clamp any integer into the `[AQI_MIN, AQI_MAX]` range.
pub fn clamp_aqi(value: i64) -> u16 {
    value.clamp(AQI_MIN as i64, AQI_MAX as i64) as u16
}

/// A named monitoring point on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Starting AQI used when readings are simulated
    pub baseline_aqi: u16,
}

impl Station {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64, baseline_aqi: u16) -> Self {
        Station {
            name: name.into(),
            lat,
            lon,
            baseline_aqi,
        }
    }
}

/// Where the AQI of a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingSource {
    /// Value reported by the upstream feed
    Real,
    /// Random stand-in for a station the upstream could not serve
    Substituted,
    /// Generated by the mock path
    Mock,
}

/// The current AQI of one station, built fresh for every request.
#[derive(Debug, Clone, PartialEq)]
pub struct StationReading {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub aqi: u16,
    pub source: ReadingSource,
}

impl StationReading {
    /// Build a reading for `station`, clamping `aqi` into range.
    pub fn new(station: &Station, aqi: i64, source: ReadingSource) -> Self {
        StationReading {
            name: station.name.clone(),
            lat: station.lat,
            lon: station.lon,
            aqi: clamp_aqi(aqi),
            source,
        }
    }
}
