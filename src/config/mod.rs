//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DERMALOGIC` prefix and nested values are separated by double underscores.
//! Every section has defaults, so an empty environment yields a working setup
//! (Paris, data in `./data`, no AI augmentation).
//!
//! # Example
//!
//! ```no_run
//! use dermalogic::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("History kept in {}", config.storage.recent_path().display());
//! ```

mod ai;
mod error;
mod features;
mod location;
mod logging;
mod storage;
mod weather;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use location::LocationConfig;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;
pub use weather::WeatherConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Data directory, file names and retention
    #[serde(default)]
    pub storage: StorageConfig,

    /// Gemini settings
    #[serde(default)]
    pub ai: AiConfig,

    /// Open-Meteo endpoints and offline cache
    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Default city
    #[serde(default)]
    pub location: LocationConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `DERMALOGIC` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DERMALOGIC__STORAGE__DATA_DIR=/var/lib/dermalogic` -> `storage.data_dir`
    /// - `DERMALOGIC__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DERMALOGIC")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.ai.validate()?;
        self.weather.validate()?;
        self.logging.validate()?;
        self.location.validate()?;
        Ok(())
    }

    /// Whether an augmenter should be wired in
    pub fn augmentation_enabled(&self) -> bool {
        self.features.enable_ai_augmentation && self.ai.has_gemini()
    }
}
