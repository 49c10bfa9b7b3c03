//! Storage configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;
use crate::adapters::storage::{
    DEFAULT_ARCHIVE_FILE, DEFAULT_CATALOG_FILE, DEFAULT_PROFILE_FILE, DEFAULT_RECENT_FILE,
};
use crate::domain::history::{RetentionPolicy, DEFAULT_RETENTION_DAYS};

/// One century; anything longer is a configuration mistake.
pub const MAX_RETENTION_DAYS: i64 = 36_500;

/// Where the JSON documents live
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding every data file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_recent_file")]
    pub recent_file: String,

    #[serde(default = "default_archive_file")]
    pub archive_file: String,

    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    #[serde(default = "default_profile_file")]
    pub profile_file: String,

    /// Age in days after which an analysis moves to the archive
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

impl StorageConfig {
    pub fn recent_path(&self) -> PathBuf {
        self.data_dir.join(&self.recent_file)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(&self.archive_file)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join(&self.profile_file)
    }

    /// Path of an auxiliary file in the data directory
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    pub fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy::days(self.retention_days)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__DATA_DIR"));
        }
        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(ValidationError::InvalidRetention);
        }
        for name in [
            &self.recent_file,
            &self.archive_file,
            &self.catalog_file,
            &self.profile_file,
        ] {
            if !is_plain_file_name(name) {
                return Err(ValidationError::InvalidFileName(name.clone()));
            }
        }
        if self.recent_file == self.archive_file {
            return Err(ValidationError::InvalidFileName(self.archive_file.clone()));
        }
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && Path::new(trimmed).file_name().is_some_and(|f| f == trimmed)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            recent_file: default_recent_file(),
            archive_file: default_archive_file(),
            catalog_file: default_catalog_file(),
            profile_file: default_profile_file(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_recent_file() -> String {
    DEFAULT_RECENT_FILE.to_string()
}

fn default_archive_file() -> String {
    DEFAULT_ARCHIVE_FILE.to_string()
}

fn default_catalog_file() -> String {
    DEFAULT_CATALOG_FILE.to_string()
}

fn default_profile_file() -> String {
    DEFAULT_PROFILE_FILE.to_string()
}

fn default_retention_days() -> i64 {
    DEFAULT_RETENTION_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.recent_path(), PathBuf::from("data/recent.json"));
        assert_eq!(config.catalog_path(), PathBuf::from("data/produits.json"));
        assert_eq!(config.retention_days, 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_retention_policy_uses_days() {
        let config = StorageConfig {
            retention_days: 30,
            ..Default::default()
        };
        assert_eq!(config.retention_policy(), RetentionPolicy::days(30));
    }

    #[test]
    fn test_validation_rejects_zero_retention() {
        let config = StorageConfig {
            retention_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRetention));
    }

    #[test]
    fn test_validation_rejects_huge_retention() {
        let config = StorageConfig {
            retention_days: 10_000_000_000_000,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRetention));

        let century = StorageConfig {
            retention_days: MAX_RETENTION_DAYS,
            ..Default::default()
        };
        assert!(century.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_nested_file_names() {
        let config = StorageConfig {
            catalog_file: "../produits.json".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidFileName(_))));
    }

    #[test]
    fn test_validation_rejects_shared_partition_file() {
        let config = StorageConfig {
            archive_file: "recent.json".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
