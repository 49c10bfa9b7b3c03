//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a recorded analysis.
///
/// Backed by a UUID v7 so ids sort in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(Uuid);

impl AnalysisId {
    /// Creates a new time-ordered AnalysisId.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnalysisId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of a location whose environment is sampled (e.g. "paris-fr").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationId(String);

impl LocationId {
    /// Creates a LocationId, rejecting blank values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ValidationError::empty_field("location_id"));
        }
        Ok(Self(id))
    }

    /// Builds a stable id from a city and country name.
    pub fn from_place(name: &str, country: &str) -> Result<Self, ValidationError> {
        let slug = |s: &str| {
            s.trim()
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-")
        };
        Self::new(format!("{}-{}", slug(name), slug(country)).trim_matches('-'))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LocationId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LocationId> for String {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_ids_are_unique() {
        assert_ne!(AnalysisId::new(), AnalysisId::new());
    }

    #[test]
    fn analysis_ids_sort_in_creation_order() {
        let first = AnalysisId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = AnalysisId::new();
        assert!(first < second);
    }

    #[test]
    fn analysis_id_parses_from_string() {
        let id = AnalysisId::new();
        let parsed: AnalysisId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn location_id_rejects_blank() {
        assert!(LocationId::new("   ").is_err());
    }

    #[test]
    fn location_id_from_place_slugs_names() {
        let id = LocationId::from_place("Saint Etienne", "France").unwrap();
        assert_eq!(id.as_str(), "saint-etienne-france");
    }

    #[test]
    fn location_id_deserialization_validates() {
        assert!(serde_json::from_str::<LocationId>("\"\"").is_err());
        let id: LocationId = serde_json::from_str("\"paris-france\"").unwrap();
        assert_eq!(id.as_str(), "paris-france");
    }
}
