//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with absolute expiry.

// == Cache Entry ==
/// A memoized value and the time it stops being servable.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl_ms` after `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now` - Insertion time in Unix milliseconds
    /// * `ttl_ms` - Time to live in milliseconds
    pub fn new(value: V, now: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// The entry is still live at exactly `expires_at`; it is expired from the
    /// next millisecond on. Reads never move `expires_at`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now > self.expires_at
    }
}
