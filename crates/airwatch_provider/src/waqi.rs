//! Client for the World Air Quality Index geo feed.
//!
//! `GET {base}/feed/geo:{lat};{lon}/?token={token}` answers with
//! `{"status": "ok", "data": {"aqi": 57, ...}}`. When the station has no
//! current value `aqi` is a placeholder string such as `"-"`. Any other
//! `status` carries an error message in `data`.

use crate::feed::{AirQualityFeed, FeedError, FeedReading};
use airwatch_core::Station;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_WAQI_URL: &str = "https://api.waqi.info";

#[derive(Debug, Deserialize)]
struct WaqiResponse {
    status: String,
    #[serde(default)]
    data: Value,
}

impl WaqiResponse {
    fn into_reading(self) -> Result<FeedReading, FeedError> {
        if self.status != "ok" {
            let message = match self.data {
                Value::String(message) => message,
                _ => self.status,
            };
            return Err(FeedError::Rejected(message));
        }

        match self.data.get("aqi") {
            Some(Value::Number(number)) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|aqi| aqi.trunc() as i64))
                .map(FeedReading::Value)
                .ok_or_else(|| FeedError::Decode(format!("unusable aqi {}", number))),
            Some(Value::String(text)) => Ok(parse_placeholder(text)),
            // null, missing or otherwise non-numeric: the station has no value
            Some(_) | None => Ok(FeedReading::NoData),
        }
    }
}

/// String AQI values are only numbers when they are all digits.
fn parse_placeholder(text: &str) -> FeedReading {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse()
            .map_or(FeedReading::NoData, FeedReading::Value)
    } else {
        FeedReading::NoData
    }
}

pub struct WaqiFeed {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl WaqiFeed {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(WaqiFeed {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn station_url(&self, station: &Station) -> String {
        format!("{}/feed/geo:{};{}/", self.base_url, station.lat, station.lon)
    }
}

#[async_trait]
impl AirQualityFeed for WaqiFeed {
    async fn station_aqi(&self, station: &Station) -> Result<FeedReading, FeedError> {
        let url = self.station_url(station);
        tracing::debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .map_err(FeedError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body: WaqiResponse = response
            .json()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))?;
        body.into_reading()
    }
}
