//! Environment Adapters
//!
//! - **OpenMeteoSource** - Live readings from the Open-Meteo forecast and air-quality APIs
//! - **CachedEnvironmentSource** - Offline fallback wrapping any other source

mod cached_source;
mod open_meteo;

pub use cached_source::CachedEnvironmentSource;
pub use open_meteo::{OpenMeteoConfig, OpenMeteoSource, DEFAULT_AIR_QUALITY_URL, DEFAULT_FORECAST_URL};
