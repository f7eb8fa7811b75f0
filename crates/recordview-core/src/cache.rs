//! Process-wide record cache.
//!
//! The cache populates lazily on first access by invoking its [`Loader`] and
//! then serves the same immutable collection for the rest of the process.
//! Population is single-flight: concurrent first callers wait on one load
//! instead of fetching the document several times. A failed load leaves the
//! cache empty so that a later call retries.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::loader::Loader;
use crate::model::RecordCollection;

/// Cache statistics.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    loads: AtomicU64,
    failures: AtomicU64,
}

impl CacheStats {
    /// Calls served from an already populated cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(AtomicOrdering::Relaxed)
    }

    /// Successful loader invocations.
    pub fn loads(&self) -> u64 {
        self.loads.load(AtomicOrdering::Relaxed)
    }

    /// Failed loader invocations.
    pub fn failures(&self) -> u64 {
        self.failures.load(AtomicOrdering::Relaxed)
    }
}

type Slot = Arc<OnceCell<Arc<RecordCollection>>>;

/// Lazily populated, init-once holder of the record collection.
pub struct RecordCache {
    loader: Arc<dyn Loader>,
    /// Current population slot. Only replaced by [`RecordCache::invalidate`].
    slot: RwLock<Slot>,
    stats: CacheStats,
}

impl RecordCache {
    /// Create an empty cache backed by `loader`.
    pub fn new(loader: Arc<dyn Loader>) -> Self {
        Self {
            loader,
            slot: RwLock::new(Arc::new(OnceCell::new())),
            stats: CacheStats::default(),
        }
    }

    /// Get the record collection, loading it on first use.
    pub async fn get(&self) -> Result<Arc<RecordCollection>, LoadError> {
        let slot = self.slot.read().clone();

        if let Some(records) = slot.get() {
            self.stats.hits.fetch_add(1, AtomicOrdering::Relaxed);
            return Ok(Arc::clone(records));
        }

        let records = slot
            .get_or_try_init(|| async {
                debug!("Record cache empty, loading");
                match self.loader.load().await {
                    Ok(records) => {
                        self.stats.loads.fetch_add(1, AtomicOrdering::Relaxed);
                        info!(records = records.len(), "Record cache populated");
                        Ok(Arc::new(records))
                    }
                    Err(e) => {
                        self.stats.failures.fetch_add(1, AtomicOrdering::Relaxed);
                        warn!(error = %e, "Record load failed, cache left empty");
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(Arc::clone(records))
    }

    /// Whether a collection is currently held.
    pub fn is_populated(&self) -> bool {
        self.slot.read().initialized()
    }

    /// Drop the held collection. The next [`RecordCache::get`] reloads.
    ///
    /// Callers already holding the previous collection keep their snapshot.
    pub fn invalidate(&self) {
        *self.slot.write() = Arc::new(OnceCell::new());
        info!("Record cache invalidated");
    }

    /// Get cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, Status};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    /// Loader that counts invocations and can be told to fail.
    #[derive(Default)]
    struct CountingLoader {
        calls: AtomicU64,
        fail: AtomicBool,
    }

    impl CountingLoader {
        fn calls(&self) -> u64 {
            self.calls.load(AtomicOrdering::SeqCst)
        }
    }

    #[async_trait]
    impl Loader for CountingLoader {
        async fn load(&self) -> Result<RecordCollection, LoadError> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail.load(AtomicOrdering::SeqCst) {
                return Err(LoadError::Config("unreachable".to_string()));
            }
            Ok(vec![Record::new(1, "only", Status::Completed)])
        }
    }

    #[tokio::test]
    async fn test_loads_once() {
        let loader = Arc::new(CountingLoader::default());
        let cache = RecordCache::new(loader.clone());
        assert!(!cache.is_populated());

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_populated());
        assert_eq!(loader.calls(), 1);
        assert_eq!(cache.stats().loads(), 1);
        assert_eq!(cache.stats().hits(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_access_is_single_flight() {
        let loader = Arc::new(CountingLoader::default());
        let cache = Arc::new(RecordCache::new(loader.clone()));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get().await.map(|r| r.len()) })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 1);
        }
        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_leaves_cache_empty_and_retries() {
        let loader = Arc::new(CountingLoader::default());
        loader.fail.store(true, AtomicOrdering::SeqCst);
        let cache = RecordCache::new(loader.clone());

        assert!(cache.get().await.is_err());
        assert!(!cache.is_populated());
        assert_eq!(cache.stats().failures(), 1);

        loader.fail.store(false, AtomicOrdering::SeqCst);
        let records = cache.get().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(loader.calls(), 2);
        assert_eq!(cache.stats().loads(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let loader = Arc::new(CountingLoader::default());
        let cache = RecordCache::new(loader.clone());

        let before = cache.get().await.unwrap();
        cache.invalidate();
        assert!(!cache.is_populated());

        let after = cache.get().await.unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before, after);
        assert_eq!(loader.calls(), 2);
    }
}
