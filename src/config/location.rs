//! Default location configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::environment::Location;

/// City analysed when none is given
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_city")]
    pub city: String,

    #[serde(default = "default_country")]
    pub country: String,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

impl LocationConfig {
    pub fn to_location(&self) -> Result<Location, ValidationError> {
        Location::new(self.city.trim(), self.country.trim(), self.latitude, self.longitude)
            .map_err(|_| ValidationError::InvalidCoordinates)
    }

    /// Validate location configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.city.trim().is_empty() {
            return Err(ValidationError::MissingRequired("LOCATION__CITY"));
        }
        self.to_location().map(|_| ())
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            country: default_country(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

fn default_city() -> String {
    "Paris".to_string()
}

fn default_country() -> String {
    "France".to_string()
}

fn default_latitude() -> f64 {
    48.8566
}

fn default_longitude() -> f64 {
    2.3522
}
