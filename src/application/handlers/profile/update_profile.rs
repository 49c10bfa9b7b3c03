//! UpdateProfileHandler - Command handler for replacing the user profile.

use std::sync::Arc;

use tracing::info;

use crate::domain::profile::UserProfile;
use crate::ports::{ProfileRepository, StorageError};

/// Command to replace the stored profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub profile: UserProfile,
}

/// Handler for profile updates.
pub struct UpdateProfileHandler {
    profile_repository: Arc<dyn ProfileRepository>,
}

impl UpdateProfileHandler {
    pub fn new(profile_repository: Arc<dyn ProfileRepository>) -> Self {
        Self { profile_repository }
    }

    /// Saves the profile and returns the previous one.
    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<UserProfile, StorageError> {
        let previous = self.profile_repository.load().await?;
        self.profile_repository.save(&cmd.profile).await?;

        info!(
            skin_type = %cmd.profile.skin_type,
            goals = cmd.profile.goals.len(),
            "Profile updated"
        );
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::FileProfileRepository;
    use crate::domain::profile::SkinType;
    use tempfile::TempDir;

    #[tokio::test]
    async fn replaces_profile_and_returns_previous() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Arc::new(FileProfileRepository::new(temp_dir.path().join("profil.json")));
        let handler = UpdateProfileHandler::new(repo.clone());
        let profile = UserProfile {
            skin_type: SkinType::Sensitive,
            ..UserProfile::default()
        }
        .with_condition("Rosacée");

        let previous = handler
            .handle(UpdateProfileCommand { profile: profile.clone() })
            .await
            .unwrap();

        assert_eq!(previous, UserProfile::default());
        assert_eq!(repo.load().await.unwrap(), profile);
    }
}
