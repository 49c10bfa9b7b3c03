//! Errors shared by the catalog command handlers.

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::{AugmentError, StorageError};

/// Error type for catalog commands.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogCommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Catalog storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Product analysis unavailable: {0}")]
    Augment(#[from] AugmentError),
}

impl From<ValidationError> for CatalogCommandError {
    fn from(err: ValidationError) -> Self {
        CatalogCommandError::Catalog(CatalogError::Validation(err))
    }
}

impl From<CatalogCommandError> for DomainError {
    fn from(err: CatalogCommandError) -> Self {
        let code = match &err {
            CatalogCommandError::Catalog(CatalogError::DuplicateProduct(_)) => ErrorCode::DuplicateProduct,
            CatalogCommandError::Catalog(CatalogError::ProductNotFound(_)) => ErrorCode::ProductNotFound,
            CatalogCommandError::Catalog(CatalogError::Validation(_)) => ErrorCode::ValidationFailed,
            CatalogCommandError::Storage(_) => ErrorCode::StorageError,
            CatalogCommandError::Augment(_) => ErrorCode::AIUnavailable,
        };
        DomainError::new(code, err.to_string())
    }
}
