use crate::config::MapSettings;
use airwatch_provider::ReadingsSource;
use std::sync::Arc;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub readings: Arc<dyn ReadingsSource>,
    pub map: MapSettings,
    /// Whether readings come from the upstream feed rather than the mock path
    pub using_real_data: bool,
}

impl AppState {
    pub fn new(readings: Arc<dyn ReadingsSource>, map: MapSettings, using_real_data: bool) -> Self {
        Self {
            readings,
            map,
            using_real_data,
        }
    }
}
