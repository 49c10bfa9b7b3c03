//! Weather source configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::environment::{OpenMeteoConfig, DEFAULT_AIR_QUALITY_URL, DEFAULT_FORECAST_URL};

/// Open-Meteo endpoints and offline cache settings
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Oldest cached snapshot served when offline; unset means no limit
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_minutes: Option<i64>,

    /// File name of the offline cache inside the data directory
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_max_age(&self) -> Option<chrono::Duration> {
        self.cache_max_age_minutes.map(chrono::Duration::minutes)
    }

    pub fn open_meteo(&self) -> OpenMeteoConfig {
        OpenMeteoConfig::default()
            .with_forecast_url(self.forecast_url.clone())
            .with_air_quality_url(self.air_quality_url.clone())
            .with_timeout(self.timeout())
    }

    /// Validate weather configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.forecast_url) {
            return Err(ValidationError::InvalidUrl("weather.forecast_url"));
        }
        if !is_http_url(&self.air_quality_url) {
            return Err(ValidationError::InvalidUrl("weather.air_quality_url"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout("weather"));
        }
        if self.cache_max_age_minutes.is_some_and(|m| m <= 0) {
            return Err(ValidationError::InvalidTimeout("weather.cache_max_age_minutes"));
        }
        if self.cache_file.trim().is_empty() || self.cache_file.contains(['/', '\\']) {
            return Err(ValidationError::InvalidFileName(self.cache_file.clone()));
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            air_quality_url: default_air_quality_url(),
            timeout_secs: default_timeout(),
            cache_max_age_minutes: default_cache_max_age(),
            cache_file: default_cache_file(),
        }
    }
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

fn default_air_quality_url() -> String {
    DEFAULT_AIR_QUALITY_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_cache_max_age() -> Option<i64> {
    Some(360)
}

fn default_cache_file() -> String {
    "meteo_cache.json".to_string()
}
