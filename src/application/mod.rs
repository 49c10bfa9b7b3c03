//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The `HistoryManager` owns the analysis history; handlers use it together
//! with the repositories and external sources.

pub mod handlers;
pub mod history_manager;

pub use handlers::{
    AddProductCommand, AddProductHandler, ProposeProductCommand, ProposeProductHandler,
    RemoveProductCommand, RemoveProductHandler, RunAnalysisCommand, RunAnalysisError,
    RunAnalysisHandler, RunAnalysisResult, UpdateProfileCommand, UpdateProfileHandler,
};
pub use history_manager::{HistoryError, HistoryManager};
