//! ProfileRepository port for user profile persistence

use async_trait::async_trait;

use super::StorageError;
use crate::domain::profile::UserProfile;

/// Repository for the single local user profile.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load the profile, or the default profile if none was saved.
    async fn load(&self) -> Result<UserProfile, StorageError>;

    /// Replace the stored profile.
    async fn save(&self, profile: &UserProfile) -> Result<(), StorageError>;
}
