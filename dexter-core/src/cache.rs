//! Session-scoped record cache with in-flight request deduplication.
//!
//! Each identifier maps to either a fetched [`Record`] or the shared future of
//! the one request currently fetching it. Callers arriving while a request is
//! pending await that same future, so concurrent loads of one identifier
//! issue a single outbound fetch. Failures are handed to every joined caller
//! and then forgotten; the slot is cleared so a later call fetches again.

use crate::catalog::CatalogClient;
use crate::error::CatalogError;
use crate::record::{Record, RecordId};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type SharedFetch = Shared<BoxFuture<'static, Result<Record, CatalogError>>>;

enum Slot {
    Ready(Record),
    Pending(SharedFetch),
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Loads answered from a stored record.
    pub hits: u64,
    /// Loads that attached to a request already in flight.
    pub joins: u64,
    /// Outbound fetches started.
    pub fetches: u64,
    /// Fetches that failed.
    pub failures: u64,
}

struct Inner {
    slots: HashMap<RecordId, Slot>,
    stats: CacheStats,
}

/// Cheaply clonable handle; clones share the same entries.
#[derive(Clone)]
pub struct RecordCache {
    client: Arc<dyn CatalogClient>,
    inner: Arc<Mutex<Inner>>,
}

impl RecordCache {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            inner: Arc::new(Mutex::new(Inner {
                slots: HashMap::new(),
                stats: CacheStats::default(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the record for `id`, fetching it if it is neither stored nor
    /// already being fetched.
    pub async fn ensure_loaded(&self, id: RecordId) -> Result<Record, CatalogError> {
        let fetch = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            match inner.slots.get(&id) {
                Some(Slot::Ready(record)) => {
                    let record = record.clone();
                    inner.stats.hits += 1;
                    tracing::debug!(%id, "cache hit");
                    return Ok(record);
                }
                Some(Slot::Pending(fetch)) => {
                    let fetch = fetch.clone();
                    inner.stats.joins += 1;
                    tracing::debug!(%id, "joining in-flight fetch");
                    fetch
                }
                None => {
                    let client = Arc::clone(&self.client);
                    let fetch = async move { client.fetch_record(id).await }
                        .boxed()
                        .shared();
                    inner.slots.insert(id, Slot::Pending(fetch.clone()));
                    inner.stats.fetches += 1;
                    fetch
                }
            }
        };

        let result = fetch.clone().await;

        let mut guard = self.lock();
        let inner = &mut *guard;
        // Only settle the slot this request owns; a retry may already sit there.
        let owns_slot = matches!(
            inner.slots.get(&id),
            Some(Slot::Pending(pending)) if pending.ptr_eq(&fetch)
        );
        if owns_slot {
            match &result {
                Ok(record) => {
                    inner.slots.insert(id, Slot::Ready(record.clone()));
                }
                Err(err) => {
                    inner.slots.remove(&id);
                    inner.stats.failures += 1;
                    tracing::debug!(%id, error = %err, "fetch failed, not cached");
                }
            }
        }
        result
    }

    /// Warm the cache for `id` without waiting. Failures are logged only.
    ///
    /// Must be called from within a tokio runtime.
    pub fn prefetch(&self, id: RecordId) {
        let cache = self.clone();
        tokio::spawn(async move {
            if let Err(err) = cache.ensure_loaded(id).await {
                tracing::warn!(%id, error = %err, "prefetch failed");
            }
        });
    }

    /// Stored record for `id`, without fetching.
    pub fn get(&self, id: RecordId) -> Option<Record> {
        match self.lock().slots.get(&id) {
            Some(Slot::Ready(record)) => Some(record.clone()),
            _ => None,
        }
    }

    pub fn is_pending(&self, id: RecordId) -> bool {
        matches!(self.lock().slots.get(&id), Some(Slot::Pending(_)))
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock()
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Flaky {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogClient for Flaky {
        async fn fetch_record(&self, id: RecordId) -> Result<Record, CatalogError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if call == 0 {
                Err(CatalogError::Transport {
                    id,
                    reason: "connection reset".to_string(),
                })
            } else {
                Ok(Record::new(id, "pikachu", "https://img/25.png"))
            }
        }
    }

    #[tokio::test]
    async fn failure_is_not_cached_and_retry_fetches_again() {
        let client = Arc::new(Flaky {
            calls: AtomicUsize::new(0),
        });
        let cache = RecordCache::new(client.clone());
        let id = RecordId::new(25).unwrap();

        assert!(cache.ensure_loaded(id).await.is_err());
        assert!(cache.get(id).is_none());
        assert!(!cache.is_pending(id));

        let record = cache.ensure_loaded(id).await.unwrap();
        assert_eq!(record.name, "pikachu");
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);

        // Third call is a hit.
        cache.ensure_loaded(id).await.unwrap();
        let stats = cache.stats();
        assert_eq!(stats.fetches, 2);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(cache.len(), 1);
    }
}
