//! Environment Source Port - Current environmental readings for a location.

use async_trait::async_trait;

use crate::domain::environment::{EnvironmentalSnapshot, Location};
use crate::domain::foundation::ValidationError;

/// Errors from environment sources.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvironmentError {
    /// The source could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The source answered with something unusable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The readings were out of range.
    #[error("invalid readings: {0}")]
    Validation(#[from] ValidationError),
}

impl EnvironmentError {
    /// Whether a cached snapshot may stand in for a fresh one.
    pub fn is_transient(&self) -> bool {
        matches!(self, EnvironmentError::Network(_))
    }
}

/// Port for fetching environmental snapshots.
#[async_trait]
pub trait EnvironmentSource: Send + Sync {
    /// Fetch the current snapshot for a location.
    async fn fetch_snapshot(&self, location: &Location) -> Result<EnvironmentalSnapshot, EnvironmentError>;
}
