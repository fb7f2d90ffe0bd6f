//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Bounded key/value store with absolute TTL and LRU eviction.
///
/// The store never reads the clock itself; every time-dependent operation
/// takes `now` in Unix milliseconds.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in milliseconds for entries stored without an explicit TTL
    default_ttl_ms: u64,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries, at least 1
    /// * `default_ttl_ms` - TTL in milliseconds used when `set` gets `None`
    pub fn new(max_entries: usize, default_ttl_ms: u64) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(max_entries),
            max_entries,
            default_ttl_ms,
        }
    }

    // == Get ==
    /// Returns a clone of the live value stored under `key`.
    ///
    /// A hit marks the key as most recently used but leaves its expiry alone.
    /// An expired entry is removed and reported as a miss.
    pub fn get(&mut self, key: &str, now: u64) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_size(self.entries.len());
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl_ms` after `now`.
    ///
    /// Overwriting an existing key replaces both the value and the expiry.
    /// Inserting a new key into a full store first drops expired entries and,
    /// if that frees nothing, evicts the least recently used entry.
    ///
    /// Returns the key evicted for capacity, if any.
    pub fn set(&mut self, key: String, value: V, ttl_ms: Option<u64>, now: u64) -> Option<String> {
        let mut evicted = None;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.purge_expired(now);

            if self.entries.len() >= self.max_entries {
                if let Some(oldest) = self.lru.evict_oldest() {
                    self.entries.remove(&oldest);
                    self.stats.record_eviction();
                    debug!(key = %oldest, "Evicted least recently used cache entry");
                    evicted = Some(oldest);
                }
            }
        }

        let ttl_ms = ttl_ms.unwrap_or(self.default_ttl_ms);
        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, now, ttl_ms));
        self.stats.set_size(self.entries.len());

        evicted
    }

    // == Remove ==
    /// Removes an entry by key, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_size(self.entries.len());
        }
        removed
    }

    // == Purge Expired ==
    /// Removes every entry expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired_keys.len());
        self.stats.set_size(self.entries.len());
        expired_keys.len()
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_size(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    /// Returns the stored entry without touching recency or checking expiry.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }
}
