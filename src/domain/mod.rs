//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - Products and the ordered product catalog
//! - `environment` - Locations and environmental snapshots
//! - `profile` - User profile and daily context
//! - `routine` - Per-slot selections and alerts
//! - `decision` - Pure rule-based routine selection
//! - `history` - Analysis records and retention

pub mod catalog;
pub mod decision;
pub mod environment;
pub mod foundation;
pub mod history;
pub mod profile;
pub mod routine;
