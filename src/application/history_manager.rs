//! HistoryManager - append-only analysis history with time-based archival.
//!
//! Every record enters the `recent` partition. `rotate` moves records older
//! than the retention window to `archive`; it runs when the manager is opened
//! and after every `record`. All operations serialize on one async mutex, so
//! a `record` and its rotation are observed as a single step.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::environment::EnvironmentalSnapshot;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::history::{AnalysisMode, AnalysisRecord, Partition, RetentionPolicy};
use crate::domain::routine::Routine;
use crate::ports::{HistoryStore, StorageError};

/// Errors from history operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HistoryError {
    /// A partition exists but cannot be read back. Never repaired automatically.
    #[error("History partition '{partition}' is corrupted: {reason}")]
    Corrupted { partition: Partition, reason: String },

    #[error("History storage error: {0}")]
    Storage(StorageError),
}

impl HistoryError {
    fn from_storage(partition: Partition, err: StorageError) -> Self {
        match err {
            StorageError::Corrupted { reason, .. } => HistoryError::Corrupted { partition, reason },
            StorageError::Validation(v) => HistoryError::Corrupted {
                partition,
                reason: v.to_string(),
            },
            other => HistoryError::Storage(other),
        }
    }
}

impl From<HistoryError> for DomainError {
    fn from(err: HistoryError) -> Self {
        match &err {
            HistoryError::Corrupted { partition, .. } => {
                DomainError::new(ErrorCode::HistoryCorrupted, err.to_string())
                    .with_detail("partition", partition.as_str())
            }
            HistoryError::Storage(_) => DomainError::new(ErrorCode::StorageError, err.to_string()),
        }
    }
}

/// Owner of the analysis history.
pub struct HistoryManager {
    store: Arc<dyn HistoryStore>,
    policy: RetentionPolicy,
    lock: Mutex<()>,
}

impl HistoryManager {
    /// Opens the history and archives anything already stale.
    ///
    /// # Errors
    /// `HistoryError::Corrupted` if either partition is unreadable.
    pub async fn open(store: Arc<dyn HistoryStore>, policy: RetentionPolicy) -> Result<Self, HistoryError> {
        let manager = Self {
            store,
            policy,
            lock: Mutex::new(()),
        };
        manager.rotate(Timestamp::now()).await?;
        Ok(manager)
    }

    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Records an analysis made now.
    pub async fn record(
        &self,
        routine: Routine,
        environment: EnvironmentalSnapshot,
        mode: AnalysisMode,
    ) -> Result<AnalysisRecord, HistoryError> {
        self.record_at(routine, environment, mode, Timestamp::now()).await
    }

    /// Records an analysis made at `now`, then rotates relative to `now`.
    ///
    /// Once the append is persisted the record is returned even if the
    /// rotation fails; stale records stay recent until the next rotation.
    pub async fn record_at(
        &self,
        routine: Routine,
        environment: EnvironmentalSnapshot,
        mode: AnalysisMode,
        now: Timestamp,
    ) -> Result<AnalysisRecord, HistoryError> {
        let _guard = self.lock.lock().await;

        let record = AnalysisRecord::new(routine, environment, mode, now);
        let mut recent = self.load(Partition::Recent).await?;
        recent.push(record.clone());
        self.overwrite(Partition::Recent, &recent).await?;

        info!(
            analysis_id = %record.id(),
            mode = %record.mode(),
            location = %record.environment().location_id(),
            "Recorded analysis"
        );

        if let Err(error) = self.rotate_locked(now).await {
            warn!(analysis_id = %record.id(), %error, "Rotation after record failed, retrying on next rotation");
        }
        Ok(record)
    }

    /// Recent records, newest first. Records with equal timestamps keep
    /// their insertion order.
    pub async fn list_recent(&self) -> Result<Vec<AnalysisRecord>, HistoryError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load(Partition::Recent).await?;
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(records)
    }

    /// The `n` newest recent records.
    pub async fn list_recent_n(&self, n: usize) -> Result<Vec<AnalysisRecord>, HistoryError> {
        let mut records = self.list_recent().await?;
        records.truncate(n);
        Ok(records)
    }

    /// Archived records, oldest archival first.
    pub async fn list_archive(&self) -> Result<Vec<AnalysisRecord>, HistoryError> {
        let _guard = self.lock.lock().await;
        self.load(Partition::Archive).await
    }

    /// Moves stale recent records to the archive. Returns how many left `recent`.
    ///
    /// Idempotent: a second call with the same `now` moves nothing and writes nothing.
    pub async fn rotate(&self, now: Timestamp) -> Result<usize, HistoryError> {
        let _guard = self.lock.lock().await;
        self.rotate_locked(now).await
    }

    async fn rotate_locked(&self, now: Timestamp) -> Result<usize, HistoryError> {
        let recent = self.load(Partition::Recent).await?;
        if recent.is_empty() {
            return Ok(0);
        }

        let (stale, kept): (Vec<_>, Vec<_>) = recent
            .into_iter()
            .partition(|r| self.policy.is_stale(r.created_at(), now));
        if stale.is_empty() {
            debug!(recent = kept.len(), "Nothing to archive");
            return Ok(0);
        }

        let mut archive = self.load(Partition::Archive).await?;
        let mut known: HashSet<_> = archive.iter().map(|r| r.id()).collect();
        let moved = stale.len();
        for record in stale {
            if known.insert(record.id()) {
                archive.push(record);
            }
        }

        // Archive first: a crash in between leaves duplicates that the next
        // rotation drops, never a lost record.
        self.overwrite(Partition::Archive, &archive).await?;
        self.overwrite(Partition::Recent, &kept).await?;

        info!(moved, recent = kept.len(), archived = archive.len(), "Rotated history");
        Ok(moved)
    }

    async fn load(&self, partition: Partition) -> Result<Vec<AnalysisRecord>, HistoryError> {
        self.store
            .load(partition)
            .await
            .map_err(|e| HistoryError::from_storage(partition, e))
    }

    async fn overwrite(&self, partition: Partition, records: &[AnalysisRecord]) -> Result<(), HistoryError> {
        self.store
            .overwrite(partition, records)
            .await
            .map_err(|e| HistoryError::from_storage(partition, e))
    }
}
