//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod analysis;
pub mod catalog;
pub mod profile;

pub use analysis::{
    AugmentationOutcome, RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler,
    RunAnalysisResult,
};
pub use catalog::{
    AddProductCommand, AddProductHandler, AddProductResult, CatalogCommandError,
    ProposeProductCommand, ProposeProductHandler, ProposeProductResult, RemoveProductCommand,
    RemoveProductHandler, RemoveProductResult,
};
pub use profile::{UpdateProfileCommand, UpdateProfileHandler};
