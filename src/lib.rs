//! DermaLogic - environment-aware skincare routines
//!
//! This crate picks a morning, midday and evening routine from the user's
//! product catalog based on live UV, humidity and pollution readings, lets an
//! optional AI model reorder and annotate that routine within strict bounds,
//! and keeps a history of analyses split into a recent and an archive
//! partition.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
