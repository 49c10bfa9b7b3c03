//! Profile Module - Who the routine is for.

mod daily_context;
mod profile;

pub use daily_context::DailyContext;
pub use profile::{AgeBand, SkinGoal, SkinType, StressLevel, UserProfile};
