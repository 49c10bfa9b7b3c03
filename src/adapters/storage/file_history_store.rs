//! File-based History Store Adapter
//!
//! Keeps each history partition in its own JSON file:
//!
//! ```text
//! {data_dir}/
//! ├── recent.json    # records younger than the retention window
//! └── archive.json   # everything older, oldest archival first
//! ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::json_file::{read_json, write_json_atomic};
use crate::domain::history::{AnalysisRecord, Partition};
use crate::ports::{HistoryStore, StorageError};

/// Default file name of the recent partition.
pub const DEFAULT_RECENT_FILE: &str = "recent.json";
/// Default file name of the archive partition.
pub const DEFAULT_ARCHIVE_FILE: &str = "archive.json";

/// File-based storage for history partitions
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    recent_path: PathBuf,
    archive_path: PathBuf,
}

impl FileHistoryStore {
    /// Create a store with explicit partition paths
    pub fn new(recent_path: impl Into<PathBuf>, archive_path: impl Into<PathBuf>) -> Self {
        Self {
            recent_path: recent_path.into(),
            archive_path: archive_path.into(),
        }
    }

    /// Create a store using the default file names inside `dir`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileHistoryStore::in_dir("./user_data");
    /// ```
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_RECENT_FILE), dir.join(DEFAULT_ARCHIVE_FILE))
    }

    /// Get the file path backing a partition
    pub fn path_of(&self, partition: Partition) -> &Path {
        match partition {
            Partition::Recent => &self.recent_path,
            Partition::Archive => &self.archive_path,
        }
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self, partition: Partition) -> Result<Vec<AnalysisRecord>, StorageError> {
        let records: Option<Vec<AnalysisRecord>> = read_json(self.path_of(partition)).await?;
        Ok(records.unwrap_or_default())
    }

    async fn overwrite(
        &self,
        partition: Partition,
        records: &[AnalysisRecord],
    ) -> Result<(), StorageError> {
        write_json_atomic(self.path_of(partition), records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ProductName, RoutineSlot};
    use crate::domain::environment::EnvironmentalSnapshot;
    use crate::domain::foundation::{LocationId, Timestamp};
    use crate::domain::history::AnalysisMode;
    use crate::domain::routine::{Alert, MomentSelection, Routine};
    use tempfile::TempDir;
    use tokio::fs;

    fn record(days_ago: i64) -> AnalysisRecord {
        let mut morning = MomentSelection::empty(RoutineSlot::Morning);
        morning.products.push(ProductName::new("SPF 50").unwrap());
        morning.alerts.push(Alert::uv_photosensitive_excluded());
        let routine = Routine::new(
            morning,
            MomentSelection::empty(RoutineSlot::Midday),
            MomentSelection::empty(RoutineSlot::Evening),
        );
        let now = Timestamp::now().minus_days(days_ago);
        let environment = EnvironmentalSnapshot::new(
            LocationId::new("nice-france").unwrap(),
            now,
            6.0,
            40.0,
            Some(12.5),
            27.0,
        )
        .unwrap();
        AnalysisRecord::new(routine, environment, AnalysisMode::Quick, now)
    }

    #[tokio::test]
    async fn test_missing_partitions_are_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHistoryStore::in_dir(temp_dir.path());

        assert!(store.load(Partition::Recent).await.unwrap().is_empty());
        assert!(store.load(Partition::Archive).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overwrite_and_load_preserve_fields() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHistoryStore::in_dir(temp_dir.path());
        let records = vec![record(3), record(1)];

        store.overwrite(Partition::Recent, &records).await.unwrap();

        assert_eq!(store.load(Partition::Recent).await.unwrap(), records);
        assert!(store.load(Partition::Archive).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_whole_partition() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHistoryStore::in_dir(temp_dir.path());

        store.overwrite(Partition::Archive, &[record(30), record(20)]).await.unwrap();
        store.overwrite(Partition::Archive, &[]).await.unwrap();

        assert!(store.load(Partition::Archive).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_partition_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHistoryStore::in_dir(temp_dir.path());
        fs::write(store.path_of(Partition::Recent), "[{\"id\": 42")
            .await
            .unwrap();

        let result = store.load(Partition::Recent).await;
        assert!(matches!(result, Err(StorageError::Corrupted { .. })));
    }

    #[test]
    fn test_paths() {
        let store = FileHistoryStore::in_dir("/tmp/dl");
        assert_eq!(store.path_of(Partition::Recent), Path::new("/tmp/dl/recent.json"));
        assert_eq!(store.path_of(Partition::Archive), Path::new("/tmp/dl/archive.json"));
    }
}
