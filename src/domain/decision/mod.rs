//! Decision Module - Deterministic routine selection.
//!
//! [`DecisionEngine`] turns a profile, a catalog and an environmental
//! snapshot into a [`Routine`](crate::domain::routine::Routine). It performs
//! no I/O and never fails except on an empty catalog.
//!
//! [`AugmentationGuard`] decides whether an externally augmented routine may
//! replace the deterministic one.

mod engine;
mod guard;

pub use engine::{AppliedFilter, DecisionEngine, DecisionError, HIGH_OCCLUSIVITY, LOW_OCCLUSIVITY};
pub use guard::{AugmentationGuard, GuardViolation};
