//! Profile command handlers.

mod update_profile;

pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
