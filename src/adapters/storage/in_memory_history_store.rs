//! In-Memory History Store Adapter
//!
//! Keeps both partitions in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::history::{AnalysisRecord, Partition};
use crate::ports::{HistoryStore, StorageError};

#[derive(Debug, Default)]
struct Partitions {
    recent: Vec<AnalysisRecord>,
    archive: Vec<AnalysisRecord>,
}

impl Partitions {
    fn get(&self, partition: Partition) -> &Vec<AnalysisRecord> {
        match partition {
            Partition::Recent => &self.recent,
            Partition::Archive => &self.archive,
        }
    }

    fn get_mut(&mut self, partition: Partition) -> &mut Vec<AnalysisRecord> {
        match partition {
            Partition::Recent => &mut self.recent,
            Partition::Archive => &mut self.archive,
        }
    }
}

/// In-memory storage for history partitions
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    partitions: Arc<RwLock<Partitions>>,
    writes: Arc<AtomicUsize>,
    fail_writes: Arc<RwLock<Option<Partition>>>,
}

impl InMemoryHistoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with both partitions
    pub fn with_records(recent: Vec<AnalysisRecord>, archive: Vec<AnalysisRecord>) -> Self {
        Self {
            partitions: Arc::new(RwLock::new(Partitions { recent, archive })),
            ..Self::default()
        }
    }

    /// Number of successful `overwrite` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every `overwrite` of `partition` fail (simulates a crash mid-rotation)
    pub async fn fail_writes_to(&self, partition: Option<Partition>) {
        *self.fail_writes.write().await = partition;
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self, partition: Partition) -> Result<Vec<AnalysisRecord>, StorageError> {
        Ok(self.partitions.read().await.get(partition).clone())
    }

    async fn overwrite(
        &self,
        partition: Partition,
        records: &[AnalysisRecord],
    ) -> Result<(), StorageError> {
        if *self.fail_writes.read().await == Some(partition) {
            return Err(StorageError::io(format!("simulated write failure on {}", partition)));
        }
        *self.partitions.write().await.get_mut(partition) = records.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
