use serde::Serialize;

/// One of the six US EPA health tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Upper bound (inclusive) of each tier, in ascending order.
/// Anything above the last bound is `Hazardous`.
const TIERS: [(u16, AqiLevel); 5] = [
    (50, AqiLevel::Good),
    (100, AqiLevel::Moderate),
    (150, AqiLevel::UnhealthyForSensitiveGroups),
    (200, AqiLevel::Unhealthy),
    (300, AqiLevel::VeryUnhealthy),
];

impl AqiLevel {
    /// Tier of an AQI value. Total over `u16`.
    pub fn from_aqi(aqi: u16) -> Self {
        TIERS
            .iter()
            .find(|(upper, _)| aqi <= *upper)
            .map_or(AqiLevel::Hazardous, |(_, level)| *level)
    }

    /// Hex color used by the map marker.
    pub fn color(self) -> &'static str {
        match self {
            AqiLevel::Good => "#00e400",
            AqiLevel::Moderate => "#ffff00",
            AqiLevel::UnhealthyForSensitiveGroups => "#ff7e00",
            AqiLevel::Unhealthy => "#ff0000",
            AqiLevel::VeryUnhealthy => "#8f3f97",
            AqiLevel::Hazardous => "#7e0023",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very Unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }
}

/// Color and health label attached to a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub color: &'static str,
    pub level: &'static str,
}

impl From<AqiLevel> for Classification {
    fn from(level: AqiLevel) -> Self {
        Classification {
            color: level.color(),
            level: level.label(),
        }
    }
}

/// Map an AQI value to its color and level.
///
/// Values are not range-checked here; readings are clamped to `[0, 500]`
/// when they are built.
pub fn classify(aqi: u16) -> Classification {
    AqiLevel::from_aqi(aqi).into()
}
