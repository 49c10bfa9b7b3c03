//! History Module - Recorded analyses and their retention.
//!
//! Records start in the `recent` partition and move, one way, to the
//! `archive` partition once the [`RetentionPolicy`] considers them stale.

mod record;
mod retention;

pub use record::{AnalysisMode, AnalysisRecord};
pub use retention::{Partition, RetentionPolicy, DEFAULT_RETENTION_DAYS};
