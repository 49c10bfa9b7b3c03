//! File-based Profile Repository Adapter

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::json_file::{read_json, write_json_atomic};
use crate::domain::profile::UserProfile;
use crate::ports::{ProfileRepository, StorageError};

/// Default profile file name.
pub const DEFAULT_PROFILE_FILE: &str = "profil.json";

/// JSON-file profile repository
#[derive(Debug, Clone)]
pub struct FileProfileRepository {
    path: PathBuf,
}

impl FileProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileRepository for FileProfileRepository {
    async fn load(&self) -> Result<UserProfile, StorageError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), StorageError> {
        write_json_atomic(&self.path, profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{SkinGoal, SkinType, StressLevel};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_default_profile_when_absent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileProfileRepository::new(temp_dir.path().join(DEFAULT_PROFILE_FILE));

        assert_eq!(repo.load().await.unwrap(), UserProfile::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileProfileRepository::new(temp_dir.path().join(DEFAULT_PROFILE_FILE));
        let profile = UserProfile {
            skin_type: SkinType::Combination,
            stress_level: StressLevel::clamped(8),
            ..UserProfile::default()
        }
        .with_allergy("Parfum")
        .with_goal(SkinGoal::AntiAcne);

        repo.save(&profile).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), profile);
    }
}
