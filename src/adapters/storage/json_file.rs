//! Shared JSON file helpers for the file-based adapters.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::StorageError;

/// Reads and parses a JSON file.
///
/// Returns `Ok(None)` when the file does not exist and
/// `StorageError::Corrupted` when it exists but does not parse.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StorageError::io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StorageError::corrupted(path.display().to_string(), e.to_string()))
}

/// Replaces a JSON file atomically.
///
/// The value is written to a sibling temporary file, flushed to disk, then
/// renamed over the target. Readers see either the old or the new content.
pub(crate) async fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::io(format!("Failed to create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    let json =
        serde_json::to_vec_pretty(value).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let temp_path = temp_path_for(path);
    let mut file = fs::File::create(&temp_path).await.map_err(|e| {
        StorageError::io(format!("Failed to create temporary file: {}", e))
    })?;
    file.write_all(&json)
        .await
        .map_err(|e| StorageError::io(format!("Failed to write temporary file: {}", e)))?;
    file.sync_all()
        .await
        .map_err(|e| StorageError::io(format!("Failed to sync temporary file: {}", e)))?;
    drop(file);

    fs::rename(&temp_path, path)
        .await
        .map_err(|e| StorageError::io(format!("Failed to rename file: {}", e)))?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let value: Option<Vec<u32>> = read_json(&dir.path().join("absent.json")).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("values.json");

        write_json_atomic(&path, &vec![1u32, 2, 3]).await.unwrap();
        let value: Option<Vec<u32>> = read_json(&path).await.unwrap();

        assert_eq!(value, Some(vec![1, 2, 3]));
        assert!(!temp_path_for(&path).exists());
    }

    #[tokio::test]
    async fn garbage_is_reported_as_corrupted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").await.unwrap();

        let result: Result<Option<Vec<u32>>, _> = read_json(&path).await;
        assert!(matches!(result, Err(StorageError::Corrupted { .. })));
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let path = Path::new("/data/recent.json");
        assert_eq!(temp_path_for(path), Path::new("/data/recent.json.tmp"));
    }
}
