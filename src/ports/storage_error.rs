//! Storage errors shared by the persistence ports.

use crate::domain::foundation::ValidationError;

/// Errors that can occur while loading or saving persisted data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize data: {0}")]
    Serialization(String),

    /// The stored data exists but cannot be read back.
    #[error("Corrupted data in {location}: {reason}")]
    Corrupted { location: String, reason: String },

    /// The stored data parses but violates a domain rule.
    #[error("Invalid stored data: {0}")]
    Validation(#[from] ValidationError),
}

impl StorageError {
    pub fn io(message: impl Into<String>) -> Self {
        StorageError::Io(message.into())
    }

    pub fn corrupted(location: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::Corrupted {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}
