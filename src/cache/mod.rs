//! Cache Module
//!
//! Provides in-memory response memoization with absolute TTL expiration and
//! LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default maximum number of cached entries
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default time to live in milliseconds (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;
