//! File-based Catalog Repository Adapter
//!
//! Stores the catalog as a JSON array of product drafts, in catalog order.
//! Drafts are validated on load, so a hand-edited file with a bad value is
//! reported instead of silently repaired.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::json_file::{read_json, write_json_atomic};
use crate::domain::catalog::{CatalogError, ProductCatalog, ProductDraft};
use crate::ports::{CatalogRepository, StorageError};

/// Default catalog file name.
pub const DEFAULT_CATALOG_FILE: &str = "produits.json";

/// JSON-file catalog repository
#[derive(Debug, Clone)]
pub struct FileCatalogRepository {
    path: PathBuf,
}

impl FileCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogRepository for FileCatalogRepository {
    async fn load(&self) -> Result<ProductCatalog, StorageError> {
        let drafts: Vec<ProductDraft> = read_json(&self.path).await?.unwrap_or_default();

        ProductCatalog::from_drafts(drafts).map_err(|e| match e {
            CatalogError::Validation(v) => StorageError::Validation(v),
            other => StorageError::corrupted(self.path.display().to_string(), other.to_string()),
        })
    }

    async fn save(&self, catalog: &ProductCatalog) -> Result<(), StorageError> {
        write_json_atomic(&self.path, &catalog.to_drafts()).await
    }
}
