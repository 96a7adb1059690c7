use airwatch_core::{ReadingSource, StationReading, StationRegistry};
use rand::Rng;
use std::ops::RangeInclusive;

/// Largest random offset applied to a station's baseline.
pub const MOCK_JITTER: i64 = 15;

/// Stand-in range when the upstream answered with no data for a station.
pub const NO_DATA_RANGE: RangeInclusive<i64> = 20..=150;

/// Stand-in range when the upstream request for a station failed.
pub const FAILURE_RANGE: RangeInclusive<i64> = 50..=150;

/// Simulated readings: every station's baseline moved by up to
/// `MOCK_JITTER` in either direction, clamped to the AQI scale.
pub fn mock_readings<R: Rng + ?Sized>(
    registry: &StationRegistry,
    rng: &mut R,
) -> Vec<StationReading> {
    registry
        .stations()
        .iter()
        .map(|station| {
            let offset = rng.gen_range(-MOCK_JITTER..=MOCK_JITTER);
            StationReading::new(
                station,
                i64::from(station.baseline_aqi) + offset,
                ReadingSource::Mock,
            )
        })
        .collect()
}
