//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the DermaLogic domain.

mod errors;
mod ids;
mod level;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AnalysisId, LocationId};
pub use level::Level;
pub use timestamp::Timestamp;
