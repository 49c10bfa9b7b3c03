//! ProposeProductHandler - asks the AI extractor for a product's attributes.
//!
//! The proposal is validated but not saved; the user confirms it through
//! `AddProductHandler`.

use std::sync::Arc;

use tracing::debug;

use super::CatalogCommandError;
use crate::domain::catalog::{Product, ProductDraft};
use crate::domain::foundation::ValidationError;
use crate::ports::ProductAttributeExtractor;

/// Command to propose attributes for a product name.
#[derive(Debug, Clone)]
pub struct ProposeProductCommand {
    pub name: String,
}

/// A validated proposal.
#[derive(Debug, Clone)]
pub struct ProposeProductResult {
    pub product: Product,
    /// The raw proposal, ready to be edited and passed to `AddProductCommand`.
    pub draft: ProductDraft,
}

/// Handler for AI product proposals.
pub struct ProposeProductHandler {
    extractor: Arc<dyn ProductAttributeExtractor>,
}

impl ProposeProductHandler {
    pub fn new(extractor: Arc<dyn ProductAttributeExtractor>) -> Self {
        Self { extractor }
    }

    pub async fn handle(&self, cmd: ProposeProductCommand) -> Result<ProposeProductResult, CatalogCommandError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }

        let draft = self.extractor.propose(name).await?;
        let product = Product::try_from(draft.clone())?;

        debug!(product = %product.name(), category = %product.category(), "Product proposal validated");
        Ok(ProposeProductResult { product, draft })
    }
}
