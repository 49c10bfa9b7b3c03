//! CatalogRepository port for product catalog persistence

use async_trait::async_trait;

use super::StorageError;
use crate::domain::catalog::ProductCatalog;

/// Repository for the user's product catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Load the whole catalog; an absent catalog is empty.
    async fn load(&self) -> Result<ProductCatalog, StorageError>;

    /// Replace the stored catalog.
    async fn save(&self, catalog: &ProductCatalog) -> Result<(), StorageError>;
}
