//! Airwatch API Library
//!
//! This library provides the HTTP API of the air quality dashboard.

mod air_quality;
mod app_state;
pub mod config;
mod dashboard;

pub use crate::air_quality::{AirQualityResponse, FAILURE_MESSAGE, StationReport};
pub use crate::app_state::AppState;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Create the application router with all endpoints
pub fn create_app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/health", get(health_check))
        .route("/api/air_quality", get(air_quality::get_air_quality))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
