//! Routine Module - Per-slot product selections and alerts.

mod alert;
mod routine;

pub use alert::{Alert, AlertKind};
pub use routine::{MomentSelection, Routine};
