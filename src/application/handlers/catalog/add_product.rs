//! AddProductHandler - Command handler for adding a product to the catalog.

use std::sync::Arc;

use tracing::info;

use super::CatalogCommandError;
use crate::domain::catalog::{Product, ProductDraft};
use crate::ports::CatalogRepository;

/// Command to add a product.
#[derive(Debug, Clone)]
pub struct AddProductCommand {
    /// Unvalidated product data (form input or accepted AI proposal).
    pub draft: ProductDraft,
}

/// Result of a successful addition.
#[derive(Debug, Clone)]
pub struct AddProductResult {
    pub product: Product,
    /// Catalog size after the addition.
    pub catalog_size: usize,
}

/// Handler for adding products.
pub struct AddProductHandler {
    catalog_repository: Arc<dyn CatalogRepository>,
}

impl AddProductHandler {
    pub fn new(catalog_repository: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog_repository }
    }

    pub async fn handle(&self, cmd: AddProductCommand) -> Result<AddProductResult, CatalogCommandError> {
        // 1. Validate before touching storage
        let product = Product::try_from(cmd.draft)?;

        // 2. Append (case-insensitive uniqueness)
        let mut catalog = self.catalog_repository.load().await?;
        catalog.add(product.clone())?;

        // 3. Persist
        self.catalog_repository.save(&catalog).await?;

        info!(product = %product.name(), category = %product.category(), "Product added");
        Ok(AddProductResult {
            product,
            catalog_size: catalog.len(),
        })
    }
}
