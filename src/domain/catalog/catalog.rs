//! ProductCatalog - ordered collection of the user's products.

use thiserror::Error;

use super::{Product, ProductDraft};
use crate::domain::foundation::ValidationError;

/// Errors raised by catalog mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("A product named '{0}' already exists in the catalog")]
    DuplicateProduct(String),

    #[error("No product named '{0}' in the catalog")]
    ProductNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// The products available to the decision engine.
///
/// Insertion order is preserved and is the tie-break order everywhere the
/// engine ranks products. Names are unique ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from products, rejecting duplicate names.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for product in products {
            catalog.add(product)?;
        }
        Ok(catalog)
    }

    /// Validates drafts and builds a catalog from them.
    pub fn from_drafts(drafts: impl IntoIterator<Item = ProductDraft>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for draft in drafts {
            catalog.add(Product::try_from(draft)?)?;
        }
        Ok(catalog)
    }

    /// Appends a product.
    pub fn add(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.get(product.name().as_str()).is_some() {
            return Err(CatalogError::DuplicateProduct(product.name().to_string()));
        }
        self.products.push(product);
        Ok(())
    }

    /// Removes a product by name, returning it.
    pub fn remove(&mut self, name: &str) -> Result<Product, CatalogError> {
        let index = self
            .position(name)
            .ok_or_else(|| CatalogError::ProductNotFound(name.to_string()))?;
        Ok(self.products.remove(index))
    }

    /// Replaces the product named `name`, keeping its catalog position.
    ///
    /// The replacement may be renamed, but not onto another product's name.
    pub fn replace(&mut self, name: &str, product: Product) -> Result<(), CatalogError> {
        let index = self
            .position(name)
            .ok_or_else(|| CatalogError::ProductNotFound(name.to_string()))?;
        if let Some(other) = self.position(product.name().as_str()) {
            if other != index {
                return Err(CatalogError::DuplicateProduct(product.name().to_string()));
            }
        }
        self.products[index] = product;
        Ok(())
    }

    /// Looks a product up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name().matches(name))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.products.iter().position(|p| p.name().matches(name))
    }

    /// Products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Catalog contents in their persisted shape.
    pub fn to_drafts(&self) -> Vec<ProductDraft> {
        self.products.iter().map(ProductDraft::from).collect()
    }
}
