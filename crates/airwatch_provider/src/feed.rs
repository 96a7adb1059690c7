use airwatch_core::Station;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Upstream host unreachable: {0}")]
    Unreachable(String),
    #[error("Upstream request timed out")]
    Timeout,
    #[error("Upstream returned HTTP status {0}")]
    Status(u16),
    #[error("Upstream rejected the request: {0}")]
    Rejected(String),
    #[error("Could not decode upstream response: {0}")]
    Decode(String),
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl FeedError {
    /// Classify a transport-level error from the HTTP client.
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FeedError::Timeout
        } else if error.is_connect() {
            FeedError::Unreachable(error.to_string())
        } else {
            FeedError::Request(error)
        }
    }

    /// Whether the failure concerns the upstream as a whole rather than a
    /// single station. Such failures abandon the batch.
    pub fn aborts_batch(&self) -> bool {
        matches!(self, FeedError::Unreachable(_))
    }
}

/// What the upstream reported for one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedReading {
    Value(i64),
    /// The upstream answered but has no current value for this point
    NoData,
}

/// A source of real-world AQI values queried by coordinate.
#[async_trait]
pub trait AirQualityFeed: Send + Sync {
    async fn station_aqi(&self, station: &Station) -> Result<FeedReading, FeedError>;
}
