use crate::app_state::AppState;
use airwatch_core::{StationReading, classify};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

pub const FAILURE_MESSAGE: &str = "Failed to fetch external data.";

/// One station as drawn on the map
#[derive(Debug, Serialize, Deserialize)]
pub struct StationReport {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub aqi: u16,
    pub color: String,
    pub level: String,
}

impl From<&StationReading> for StationReport {
    fn from(reading: &StationReading) -> Self {
        let classification = classify(reading.aqi);
        StationReport {
            name: reading.name.clone(),
            lat: reading.lat,
            lon: reading.lon,
            aqi: reading.aqi,
            color: classification.color.to_string(),
            level: classification.level.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AirQualityResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stations: Option<Vec<StationReport>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AirQualityResponse {
    fn ok(stations: Vec<StationReport>) -> Self {
        AirQualityResponse {
            success: true,
            stations: Some(stations),
            message: None,
        }
    }

    fn failure() -> Self {
        AirQualityResponse {
            success: false,
            stations: None,
            message: Some(FAILURE_MESSAGE.to_string()),
        }
    }
}

/// Current readings of every station, with color and health level
pub async fn get_air_quality(State(state): State<AppState>) -> Response {
    match state.readings.readings().await {
        Ok(readings) => {
            tracing::info!("Serving {} station readings", readings.len());
            let stations = readings.iter().map(StationReport::from).collect();
            (StatusCode::OK, Json(AirQualityResponse::ok(stations))).into_response()
        }
        Err(error) => {
            tracing::error!("Error fetching air quality data: {}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AirQualityResponse::failure()),
            )
                .into_response()
        }
    }
}
