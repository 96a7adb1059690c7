//! Station readings with graceful degradation.
//!
//! Readings come from the upstream feed when an API key is configured, and
//! from a mock generator otherwise. Upstream trouble never reaches the
//! caller: a failing station gets a random stand-in value, and an
//! unreachable upstream sends the whole batch to the mock generator.

mod feed;
mod mock;
mod waqi;

pub use crate::feed::{AirQualityFeed, FeedError, FeedReading};
pub use crate::mock::{FAILURE_RANGE, MOCK_JITTER, NO_DATA_RANGE, mock_readings};
pub use crate::waqi::{DEFAULT_WAQI_URL, WaqiFeed};

use airwatch_core::{ReadingSource, StationReading, StationRegistry};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Station readings unavailable: {0}")]
    Unavailable(String),
}

/// Anything able to produce the current list of station readings.
#[async_trait]
pub trait ReadingsSource: Send + Sync {
    async fn readings(&self) -> Result<Vec<StationReading>, ProviderError>;
}

/// Settings for the upstream feed and the mock path.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Upstream token. `None` or blank selects the mock path.
    pub api_key: Option<String>,
    pub upstream_url: String,
    /// Bound on each upstream request
    pub timeout: Duration,
    /// Simulated delay of the mock path
    pub mock_latency: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            api_key: None,
            upstream_url: DEFAULT_WAQI_URL.to_string(),
            timeout: Duration::from_secs(10),
            mock_latency: Duration::from_millis(500),
        }
    }
}

pub struct DataProvider {
    registry: StationRegistry,
    feed: Option<Arc<dyn AirQualityFeed>>,
    mock_latency: Duration,
}

impl DataProvider {
    /// Build a provider backed by the WAQI feed when a key is present.
    pub fn new(config: ProviderConfig, registry: StationRegistry) -> Result<Self, FeedError> {
        let feed = match config.api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => {
                let feed = WaqiFeed::new(config.upstream_url, key, config.timeout)?;
                Some(Arc::new(feed) as Arc<dyn AirQualityFeed>)
            }
            None => None,
        };
        Ok(Self::with_feed(registry, feed, config.mock_latency))
    }

    pub fn with_feed(
        registry: StationRegistry,
        feed: Option<Arc<dyn AirQualityFeed>>,
        mock_latency: Duration,
    ) -> Self {
        DataProvider {
            registry,
            feed,
            mock_latency,
        }
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    /// Whether readings are requested from the upstream at all.
    pub fn uses_real_data(&self) -> bool {
        self.feed.is_some()
    }

    /// One reading per registered station, in registry order.
    ///
    /// Never fails; see the module documentation for the fallback rules.
    pub async fn fetch_readings<R: Rng + Send>(&self, rng: &mut R) -> Vec<StationReading> {
        let Some(feed) = &self.feed else {
            tracing::info!("No API key configured, using mock data");
            return self.mock_path(rng).await;
        };

        match self.fetch_from_feed(feed.as_ref(), rng).await {
            Ok(readings) => readings,
            Err(error) => {
                tracing::warn!("Error fetching from upstream: {}. Falling back to mock data", error);
                self.mock_path(rng).await
            }
        }
    }

    async fn fetch_from_feed<R: Rng + Send>(
        &self,
        feed: &dyn AirQualityFeed,
        rng: &mut R,
    ) -> Result<Vec<StationReading>, FeedError> {
        let mut readings = Vec::with_capacity(self.registry.len());
        for station in self.registry.stations() {
            let reading = match feed.station_aqi(station).await {
                Ok(FeedReading::Value(aqi)) => {
                    StationReading::new(station, aqi, ReadingSource::Real)
                }
                Ok(FeedReading::NoData) => {
                    tracing::debug!("No upstream data for {}", station.name);
                    let aqi = rng.gen_range(NO_DATA_RANGE);
                    StationReading::new(station, aqi, ReadingSource::Substituted)
                }
                Err(error) if error.aborts_batch() => return Err(error),
                Err(error) => {
                    tracing::warn!("Upstream failed for {}: {}", station.name, error);
                    let aqi = rng.gen_range(FAILURE_RANGE);
                    StationReading::new(station, aqi, ReadingSource::Substituted)
                }
            };
            readings.push(reading);
        }
        Ok(readings)
    }

    async fn mock_path<R: Rng + Send>(&self, rng: &mut R) -> Vec<StationReading> {
        if !self.mock_latency.is_zero() {
            tokio::time::sleep(self.mock_latency).await;
        }
        mock_readings(&self.registry, rng)
    }
}

#[async_trait]
impl ReadingsSource for DataProvider {
    async fn readings(&self) -> Result<Vec<StationReading>, ProviderError> {
        let mut rng = StdRng::from_entropy();
        Ok(self.fetch_readings(&mut rng).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwatch_core::Station;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Script {
        Value(i64),
        NoData,
        Status(u16),
        Timeout,
        Unreachable,
    }

    /// Answers each station by name from a fixed script.
    struct ScriptedFeed {
        script: HashMap<String, Script>,
        calls: AtomicUsize,
    }

    impl ScriptedFeed {
        fn new(entries: &[(&str, Script)]) -> Arc<Self> {
            Arc::new(ScriptedFeed {
                script: entries
                    .iter()
                    .map(|(name, script)| (name.to_string(), *script))
                    .collect(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AirQualityFeed for ScriptedFeed {
        async fn station_aqi(&self, station: &Station) -> Result<FeedReading, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script.get(&station.name).copied().unwrap_or(Script::NoData) {
                Script::Value(aqi) => Ok(FeedReading::Value(aqi)),
                Script::NoData => Ok(FeedReading::NoData),
                Script::Status(code) => Err(FeedError::Status(code)),
                Script::Timeout => Err(FeedError::Timeout),
                Script::Unreachable => Err(FeedError::Unreachable("connection refused".into())),
            }
        }
    }

    fn registry() -> StationRegistry {
        StationRegistry::new(vec![
            Station::new("North", -1.2, 36.8, 40),
            Station::new("South", -1.4, 36.8, 90),
            Station::new("East", -1.3, 36.9, 160),
        ])
        .unwrap()
    }

    fn provider_with(feed: Arc<ScriptedFeed>) -> DataProvider {
        DataProvider::with_feed(registry(), Some(feed as Arc<dyn AirQualityFeed>), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_no_key_uses_mock_without_network() {
        let config = ProviderConfig {
            api_key: None,
            // Would fail if it were ever contacted
            upstream_url: "http://127.0.0.1:1".into(),
            mock_latency: Duration::ZERO,
            ..ProviderConfig::default()
        };
        let provider = DataProvider::new(config, registry()).unwrap();
        assert!(!provider.uses_real_data());

        let readings = provider.fetch_readings(&mut StdRng::seed_from_u64(1)).await;
        assert_eq!(readings.len(), 3);
        assert!(readings.iter().all(|r| r.source == ReadingSource::Mock));
    }

    #[tokio::test]
    async fn test_blank_key_counts_as_missing() {
        let config = ProviderConfig {
            api_key: Some("   ".into()),
            ..ProviderConfig::default()
        };
        let provider = DataProvider::new(config, registry()).unwrap();
        assert!(!provider.uses_real_data());

        let config = ProviderConfig {
            api_key: Some("token".into()),
            ..ProviderConfig::default()
        };
        let provider = DataProvider::new(config, registry()).unwrap();
        assert!(provider.uses_real_data());
    }

    #[tokio::test]
    async fn test_real_values_are_used_and_clamped() {
        let feed = ScriptedFeed::new(&[
            ("North", Script::Value(12)),
            ("South", Script::Value(640)),
            ("East", Script::Value(-3)),
        ]);
        let provider = provider_with(feed.clone());

        let readings = provider.fetch_readings(&mut StdRng::seed_from_u64(1)).await;

        assert_eq!(feed.calls(), 3);
        let aqis: Vec<u16> = readings.iter().map(|r| r.aqi).collect();
        assert_eq!(aqis, vec![12, 500, 0]);
        assert!(readings.iter().all(|r| r.source == ReadingSource::Real));
    }

    #[tokio::test]
    async fn test_failed_station_is_isolated() {
        let feed = ScriptedFeed::new(&[
            ("North", Script::Value(33)),
            ("South", Script::Status(500)),
            ("East", Script::Value(171)),
        ]);
        let provider = provider_with(feed.clone());

        for seed in 0..50 {
            let readings = provider.fetch_readings(&mut StdRng::seed_from_u64(seed)).await;

            assert_eq!(readings[0].aqi, 33);
            assert_eq!(readings[0].source, ReadingSource::Real);
            assert_eq!(readings[1].source, ReadingSource::Substituted);
            assert!(FAILURE_RANGE.contains(&i64::from(readings[1].aqi)));
            assert_eq!(readings[2].aqi, 171);
            assert_eq!(readings[2].source, ReadingSource::Real);
        }
    }

    #[tokio::test]
    async fn test_timed_out_station_is_isolated() {
        let feed = ScriptedFeed::new(&[
            ("North", Script::Timeout),
            ("South", Script::Value(64)),
            ("East", Script::Value(210)),
        ]);
        let provider = provider_with(feed.clone());

        let readings = provider.fetch_readings(&mut StdRng::seed_from_u64(5)).await;

        assert_eq!(feed.calls(), 3);
        assert_eq!(readings[0].source, ReadingSource::Substituted);
        assert!(FAILURE_RANGE.contains(&i64::from(readings[0].aqi)));
        assert_eq!(readings[1].aqi, 64);
        assert_eq!(readings[1].source, ReadingSource::Real);
        assert_eq!(readings[2].aqi, 210);
        assert_eq!(readings[2].source, ReadingSource::Real);
    }

    #[tokio::test]
    async fn test_no_data_substitution_range() {
        let feed = ScriptedFeed::new(&[("North", Script::NoData), ("South", Script::Value(70))]);
        let provider = provider_with(feed);

        for seed in 0..50 {
            let readings = provider.fetch_readings(&mut StdRng::seed_from_u64(seed)).await;
            assert_eq!(readings[0].source, ReadingSource::Substituted);
            assert!(NO_DATA_RANGE.contains(&i64::from(readings[0].aqi)));
            assert_eq!(readings[1].aqi, 70);
        }
    }

    #[tokio::test]
    async fn test_unreachable_upstream_falls_back_to_mock() {
        let feed = ScriptedFeed::new(&[
            ("North", Script::Value(33)),
            ("South", Script::Unreachable),
            ("East", Script::Value(171)),
        ]);
        let provider = provider_with(feed.clone());

        let readings = provider.fetch_readings(&mut StdRng::seed_from_u64(9)).await;

        // The batch stops at the first unreachable station
        assert_eq!(feed.calls(), 2);
        assert_eq!(readings.len(), 3);
        assert!(readings.iter().all(|r| r.source == ReadingSource::Mock));
        for (reading, station) in readings.iter().zip(registry().stations()) {
            let delta = i64::from(reading.aqi) - i64::from(station.baseline_aqi);
            assert!(delta.abs() <= MOCK_JITTER);
        }
    }

    #[tokio::test]
    async fn test_readings_source_never_fails() {
        let provider = DataProvider::with_feed(registry(), None, Duration::ZERO);
        let readings = provider.readings().await.unwrap();
        assert_eq!(readings.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_path_simulates_latency() {
        let provider = DataProvider::with_feed(registry(), None, Duration::from_millis(500));
        let started = tokio::time::Instant::now();

        provider.fetch_readings(&mut StdRng::seed_from_u64(3)).await;

        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
