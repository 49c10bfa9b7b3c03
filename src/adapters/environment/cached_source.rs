//! Cached Environment Source - offline fallback around another source.
//!
//! Every successful fetch is remembered per location (and optionally written
//! to a JSON file so it survives restarts). When the wrapped source fails
//! with a transient network error, the last snapshot for that location is
//! served instead, provided it is not older than the configured maximum age.
//! Non-transient errors are never masked.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::adapters::storage::json_file::{read_json, write_json_atomic};
use crate::domain::environment::{EnvironmentalSnapshot, Location};
use crate::domain::foundation::{LocationId, Timestamp};
use crate::ports::{EnvironmentError, EnvironmentSource};

type SnapshotCache = BTreeMap<LocationId, EnvironmentalSnapshot>;

/// Environment source with an offline cache.
pub struct CachedEnvironmentSource {
    inner: Arc<dyn EnvironmentSource>,
    cache: RwLock<Option<SnapshotCache>>,
    cache_file: Option<PathBuf>,
    max_age: Option<Duration>,
}

impl CachedEnvironmentSource {
    /// Wraps `inner` with an in-memory cache and no age limit.
    pub fn new(inner: Arc<dyn EnvironmentSource>) -> Self {
        Self {
            inner,
            cache: RwLock::new(None),
            cache_file: None,
            max_age: None,
        }
    }

    /// Persists the cache to `path`.
    pub fn with_cache_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_file = Some(path.into());
        self
    }

    /// Refuses cached snapshots older than `max_age`.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Lazily loads the persisted cache on first use.
    async fn cached(&self, location_id: &LocationId) -> Option<EnvironmentalSnapshot> {
        {
            let cache = self.cache.read().await;
            if let Some(map) = cache.as_ref() {
                return map.get(location_id).cloned();
            }
        }
        let loaded = self.load_file().await;
        let mut cache = self.cache.write().await;
        cache.get_or_insert(loaded).get(location_id).cloned()
    }

    async fn load_file(&self) -> SnapshotCache {
        let Some(path) = &self.cache_file else {
            return SnapshotCache::new();
        };
        match read_json::<SnapshotCache>(path).await {
            Ok(map) => map.unwrap_or_default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable environment cache");
                SnapshotCache::new()
            }
        }
    }

    async fn remember(&self, snapshot: &EnvironmentalSnapshot) {
        let mut cache = self.cache.write().await;
        if cache.is_none() {
            *cache = Some(self.load_file().await);
        }
        let Some(map) = cache.as_mut() else {
            return;
        };
        map.insert(snapshot.location_id().clone(), snapshot.clone());

        if let Some(path) = &self.cache_file {
            if let Err(e) = write_json_atomic(path, &*map).await {
                warn!(path = %path.display(), error = %e, "Failed to persist environment cache");
            }
        }
    }

    fn is_fresh_enough(&self, snapshot: &EnvironmentalSnapshot, now: Timestamp) -> bool {
        match self.max_age {
            Some(max_age) => now.duration_since(&snapshot.captured_at()) <= max_age,
            None => true,
        }
    }
}

#[async_trait]
impl EnvironmentSource for CachedEnvironmentSource {
    async fn fetch_snapshot(&self, location: &Location) -> Result<EnvironmentalSnapshot, EnvironmentError> {
        match self.inner.fetch_snapshot(location).await {
            Ok(snapshot) => {
                self.remember(&snapshot).await;
                Ok(snapshot)
            }
            Err(err) if err.is_transient() => match self.cached(&location.id).await {
                Some(snapshot) if self.is_fresh_enough(&snapshot, Timestamp::now()) => {
                    info!(
                        location = %location,
                        captured_at = %snapshot.captured_at(),
                        error = %err,
                        "Serving cached environmental snapshot"
                    );
                    Ok(snapshot)
                }
                _ => Err(err),
            },
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Source answering from a queue of scripted results.
    struct ScriptedSource {
        results: Mutex<VecDeque<Result<EnvironmentalSnapshot, EnvironmentError>>>,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<EnvironmentalSnapshot, EnvironmentError>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(results.into()),
            })
        }
    }

    #[async_trait]
    impl EnvironmentSource for ScriptedSource {
        async fn fetch_snapshot(&self, _location: &Location) -> Result<EnvironmentalSnapshot, EnvironmentError> {
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(EnvironmentError::Network("script exhausted".to_string())))
        }
    }

    fn lyon() -> Location {
        Location::new("Lyon", "France", 45.764, 4.8357).unwrap()
    }

    fn snapshot(captured_at: Timestamp) -> EnvironmentalSnapshot {
        EnvironmentalSnapshot::new(lyon().id, captured_at, 5.0, 50.0, Some(10.0), 22.0).unwrap()
    }

    fn offline() -> Result<EnvironmentalSnapshot, EnvironmentError> {
        Err(EnvironmentError::Network("offline".to_string()))
    }

    #[tokio::test]
    async fn serves_last_snapshot_when_offline() {
        let fresh = snapshot(Timestamp::now());
        let source = CachedEnvironmentSource::new(ScriptedSource::new(vec![Ok(fresh.clone()), offline()]));

        assert_eq!(source.fetch_snapshot(&lyon()).await.unwrap(), fresh);
        assert_eq!(source.fetch_snapshot(&lyon()).await.unwrap(), fresh);
    }

    #[tokio::test]
    async fn empty_cache_propagates_network_error() {
        let source = CachedEnvironmentSource::new(ScriptedSource::new(vec![offline()]));

        let result = source.fetch_snapshot(&lyon()).await;
        assert!(matches!(result, Err(EnvironmentError::Network(_))));
    }

    #[tokio::test]
    async fn stale_cache_is_refused() {
        let old = snapshot(Timestamp::now().minus_days(2));
        let source = CachedEnvironmentSource::new(ScriptedSource::new(vec![Ok(old), offline()]))
            .with_max_age(Duration::hours(6));

        source.fetch_snapshot(&lyon()).await.unwrap();
        assert!(source.fetch_snapshot(&lyon()).await.is_err());
    }

    #[tokio::test]
    async fn invalid_responses_are_not_masked() {
        let source = CachedEnvironmentSource::new(ScriptedSource::new(vec![
            Ok(snapshot(Timestamp::now())),
            Err(EnvironmentError::InvalidResponse("html".to_string())),
        ]));

        source.fetch_snapshot(&lyon()).await.unwrap();
        assert!(matches!(
            source.fetch_snapshot(&lyon()).await,
            Err(EnvironmentError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn cache_file_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meteo_cache.json");
        let fresh = snapshot(Timestamp::now());

        let first = CachedEnvironmentSource::new(ScriptedSource::new(vec![Ok(fresh.clone())]))
            .with_cache_file(&path);
        first.fetch_snapshot(&lyon()).await.unwrap();

        let second = CachedEnvironmentSource::new(ScriptedSource::new(vec![offline()]))
            .with_cache_file(&path);
        assert_eq!(second.fetch_snapshot(&lyon()).await.unwrap(), fresh);
    }
}
