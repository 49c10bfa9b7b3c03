//! History Store Port - Whole-partition persistence for analysis records.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::history::{AnalysisRecord, Partition};

/// Port for reading and replacing history partitions.
///
/// Implementations must make `overwrite` all-or-nothing: after a failure the
/// previous content of the partition is still readable.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load every record of a partition, in stored order.
    ///
    /// # Errors
    /// Returns `StorageError::Corrupted` if the partition exists but is unreadable.
    /// A partition that was never written is empty, not an error.
    async fn load(&self, partition: Partition) -> Result<Vec<AnalysisRecord>, StorageError>;

    /// Replace the whole content of a partition.
    async fn overwrite(
        &self,
        partition: Partition,
        records: &[AnalysisRecord],
    ) -> Result<(), StorageError>;
}
