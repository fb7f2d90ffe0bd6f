//! Shared Cache Handle
//!
//! Process-wide handle around a [`CacheStore`] that owns the clock and
//! provides the memoizing `get_or_compute` entry point used by handlers.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::clock::Clock;

// == Shared Cache ==
/// Cloneable, thread-safe handle to a single cache store.
///
/// The store mutex is held only for individual reads and writes, never while
/// a computation runs. Two callers missing on the same key at the same time
/// will both compute; whichever stores last wins.
pub struct SharedCache<V> {
    store: Arc<Mutex<CacheStore<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<V: Clone + Send + 'static> SharedCache<V> {
    /// Wraps `store`, reading time from `clock`.
    pub fn new(store: CacheStore<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            clock,
        }
    }

    // == Get Or Compute ==
    /// Returns the live value for `key`, or runs `compute` and stores its
    /// result for `ttl_ms` (the store default when `None`).
    ///
    /// A failed computation is returned unchanged and leaves no entry behind,
    /// so the next call for `key` computes again.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl_ms: Option<u64>,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cached = {
            let mut store = self.store.lock().await;
            store.get(key, self.clock.now_ms())
        };
        if let Some(value) = cached {
            debug!(key, "Cache hit");
            return Ok(value);
        }

        debug!(key, "Cache miss, computing");
        let value = compute().await?;

        let mut store = self.store.lock().await;
        store.set(key.to_string(), value.clone(), ttl_ms, self.clock.now_ms());
        Ok(value)
    }

    /// Returns the live value for `key` without computing anything.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        self.store.lock().await.get(key, now)
    }

    /// Stores `value`, replacing any existing value and expiry.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl_ms: Option<u64>) {
        let now = self.clock.now_ms();
        self.store.lock().await.set(key.into(), value, ttl_ms, now);
    }

    pub async fn remove(&self, key: &str) -> bool {
        self.store.lock().await.remove(key)
    }

    /// Drops every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        self.store.lock().await.purge_expired(now)
    }

    pub async fn clear(&self) {
        self.store.lock().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    pub async fn capacity(&self) -> usize {
        self.store.lock().await.capacity()
    }
}
