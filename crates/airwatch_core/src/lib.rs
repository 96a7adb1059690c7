//! Air quality data model and AQI classification.

mod classifier;
mod models;
mod registry;

pub use crate::classifier::*;
pub use crate::models::*;
pub use crate::registry::*;
