//! Cache Statistics Module
//!
//! Tracks cache performance metrics and the size/capacity pair reported by
//! the health endpoint.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a live entry
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// Entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Entries currently stored
    pub size: usize,
    /// Configured capacity
    pub max: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates zeroed stats for a cache of the given capacity.
    pub fn new(max: usize) -> Self {
        Self {
            max,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new(1000);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.size, 0);
        assert_eq!(stats.max, 1000);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(CacheStats::new(1).hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new(1);
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_evictions_and_expirations() {
        let mut stats = CacheStats::new(1);
        stats.record_eviction();
        stats.record_eviction();
        stats.record_expirations(3);
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.expirations, 3);
    }

    #[test]
    fn test_serializes_size_and_max() {
        let mut stats = CacheStats::new(1000);
        stats.set_size(7);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["size"], 7);
        assert_eq!(json["max"], 1000);
    }
}
