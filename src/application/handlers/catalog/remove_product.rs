//! RemoveProductHandler - Command handler for removing a product from the catalog.

use std::sync::Arc;

use tracing::info;

use super::CatalogCommandError;
use crate::domain::catalog::Product;
use crate::ports::CatalogRepository;

/// Command to remove a product by name (case-insensitive).
#[derive(Debug, Clone)]
pub struct RemoveProductCommand {
    pub name: String,
}

/// Result of a successful removal.
#[derive(Debug, Clone)]
pub struct RemoveProductResult {
    pub removed: Product,
    pub catalog_size: usize,
}

/// Handler for removing products.
pub struct RemoveProductHandler {
    catalog_repository: Arc<dyn CatalogRepository>,
}

impl RemoveProductHandler {
    pub fn new(catalog_repository: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog_repository }
    }

    pub async fn handle(&self, cmd: RemoveProductCommand) -> Result<RemoveProductResult, CatalogCommandError> {
        let mut catalog = self.catalog_repository.load().await?;
        let removed = catalog.remove(&cmd.name)?;
        self.catalog_repository.save(&catalog).await?;

        info!(product = %removed.name(), "Product removed");
        Ok(RemoveProductResult {
            removed,
            catalog_size: catalog.len(),
        })
    }
}
