//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `HistoryStore` - Whole-partition storage for analysis records
//! - `CatalogRepository` - Product catalog storage
//! - `ProfileRepository` - User profile storage
//!
//! ## External Service Ports
//!
//! - `EnvironmentSource` - Weather and air-quality readings
//! - `RoutineAugmenter` - Optional routine enrichment (soft dependency)
//! - `ProductAttributeExtractor` - AI-proposed product attributes

mod catalog_repository;
mod environment_source;
mod history_store;
mod profile_repository;
mod routine_augmenter;
mod storage_error;

pub use catalog_repository::CatalogRepository;
pub use environment_source::{EnvironmentError, EnvironmentSource};
pub use history_store::HistoryStore;
pub use profile_repository::ProfileRepository;
pub use routine_augmenter::{
    AugmentError, AugmentationRequest, ProductAttributeExtractor, RoutineAugmenter,
};
pub use storage_error::StorageError;
