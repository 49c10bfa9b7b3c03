//! Open-Meteo Source - Implementation of EnvironmentSource over the Open-Meteo APIs.
//!
//! Two endpoints are queried for the location's coordinates:
//!
//! - forecast: current `uv_index`, `relative_humidity_2m`, `temperature_2m`
//! - air quality: current `pm2_5`
//!
//! The forecast is mandatory. The air-quality call is best effort: when it
//! fails, the snapshot is built without PM2.5 and the purity filter stays off.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenMeteoConfig::default().with_timeout(Duration::from_secs(5));
//! let source = OpenMeteoSource::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::environment::{EnvironmentalSnapshot, Location};
use crate::domain::foundation::Timestamp;
use crate::ports::{EnvironmentError, EnvironmentSource};

/// Default forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
/// Default air-quality endpoint.
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

/// Configuration for the Open-Meteo source.
#[derive(Debug, Clone)]
pub struct OpenMeteoConfig {
    pub forecast_url: String,
    pub air_quality_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl OpenMeteoConfig {
    pub fn with_forecast_url(mut self, url: impl Into<String>) -> Self {
        self.forecast_url = url.into();
        self
    }

    pub fn with_air_quality_url(mut self, url: impl Into<String>) -> Self {
        self.air_quality_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Open-Meteo environment source.
pub struct OpenMeteoSource {
    config: OpenMeteoConfig,
    client: Client,
}

impl OpenMeteoSource {
    /// Creates a source with its own HTTP client.
    pub fn new(config: OpenMeteoConfig) -> Result<Self, EnvironmentError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EnvironmentError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn get(&self, url: &str, location: &Location, current: &str) -> Result<Response, EnvironmentError> {
        let response = self
            .client
            .get(url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", current.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EnvironmentError::Network(format!("Request timed out: {}", e))
                } else {
                    EnvironmentError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            Err(EnvironmentError::Network(format!("Server error {}: {}", status, body)))
        } else {
            Err(EnvironmentError::InvalidResponse(format!(
                "Unexpected status {}: {}",
                status, body
            )))
        }
    }

    async fn fetch_forecast(&self, location: &Location) -> Result<ForecastResponse, EnvironmentError> {
        self.get(
            &self.config.forecast_url,
            location,
            "temperature_2m,relative_humidity_2m,uv_index",
        )
        .await?
        .json()
        .await
        .map_err(|e| EnvironmentError::InvalidResponse(format!("Failed to parse forecast: {}", e)))
    }

    async fn fetch_air_quality(&self, location: &Location) -> Result<AirQualityResponse, EnvironmentError> {
        self.get(&self.config.air_quality_url, location, "pm2_5")
            .await?
            .json()
            .await
            .map_err(|e| EnvironmentError::InvalidResponse(format!("Failed to parse air quality: {}", e)))
    }
}

#[async_trait]
impl EnvironmentSource for OpenMeteoSource {
    async fn fetch_snapshot(&self, location: &Location) -> Result<EnvironmentalSnapshot, EnvironmentError> {
        let forecast = self.fetch_forecast(location).await?;

        let air_quality = match self.fetch_air_quality(location).await {
            Ok(air) => Some(air),
            Err(e) => {
                warn!(location = %location, error = %e, "Air quality unavailable, continuing without PM2.5");
                None
            }
        };

        let snapshot = build_snapshot(location, Timestamp::now(), forecast, air_quality)?;
        debug!(
            location = %location,
            uv = snapshot.uv_index(),
            humidity = snapshot.humidity_pct(),
            pm25 = ?snapshot.pm25(),
            "Fetched environmental snapshot"
        );
        Ok(snapshot)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Open-Meteo API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<ForecastCurrent>,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    uv_index: Option<f64>,
    relative_humidity_2m: Option<f64>,
    temperature_2m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: Option<AirQualityCurrent>,
}

#[derive(Debug, Deserialize)]
struct AirQualityCurrent {
    pm2_5: Option<f64>,
}

/// Combines the two API answers into a validated snapshot.
///
/// A missing UV reading (reported at night by some stations) counts as 0.
fn build_snapshot(
    location: &Location,
    captured_at: Timestamp,
    forecast: ForecastResponse,
    air_quality: Option<AirQualityResponse>,
) -> Result<EnvironmentalSnapshot, EnvironmentError> {
    let current = forecast
        .current
        .ok_or_else(|| EnvironmentError::InvalidResponse("forecast has no 'current' block".to_string()))?;

    let humidity = current.relative_humidity_2m.ok_or_else(|| {
        EnvironmentError::InvalidResponse("forecast has no relative_humidity_2m".to_string())
    })?;
    let temperature = current
        .temperature_2m
        .ok_or_else(|| EnvironmentError::InvalidResponse("forecast has no temperature_2m".to_string()))?;
    let pm25 = air_quality.and_then(|a| a.current).and_then(|c| c.pm2_5);

    Ok(EnvironmentalSnapshot::new(
        location.id.clone(),
        captured_at,
        current.uv_index.unwrap_or(0.0),
        humidity,
        pm25,
        temperature,
    )?)
}
