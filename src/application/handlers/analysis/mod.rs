//! Analysis command handlers.
//!
//! Handler that runs the decision pipeline end to end and records the result.

mod run_analysis;

pub use run_analysis::{
    AugmentationOutcome, RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler,
    RunAnalysisResult, RECENT_CONTEXT_SIZE,
};
