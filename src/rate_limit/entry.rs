//! Rate Limit Entry Module
//!
//! Per-client counter for one fixed window.

// == Rate Limit Entry ==
/// Requests seen from one client in its current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    /// Requests admitted in the current window
    pub count: u32,
    /// End of the current window (Unix milliseconds)
    pub reset_at: u64,
}

impl RateLimitEntry {
    // == Constructor ==
    /// Opens a fresh window starting at `now`.
    pub fn new(now: u64, window_ms: u64) -> Self {
        Self {
            count: 0,
            reset_at: now.saturating_add(window_ms),
        }
    }

    // == Is Expired ==
    /// The window is over once `now` is past `reset_at`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now > self.reset_at
    }

    // == Retry After ==
    /// Whole seconds until the window resets, rounded up, never below 1.
    pub fn retry_after_secs(&self, now: u64) -> u64 {
        let remaining_ms = self.reset_at.saturating_sub(now);
        remaining_ms.div_ceil(1000).max(1)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry() {
        let entry = RateLimitEntry::new(1_000, 60_000);
        assert_eq!(entry.count, 0);
        assert_eq!(entry.reset_at, 61_000);
    }

    #[test]
    fn test_expiry_boundary() {
        let entry = RateLimitEntry::new(0, 60_000);
        assert!(!entry.is_expired_at(60_000));
        assert!(entry.is_expired_at(60_001));
    }

    #[test]
    fn test_retry_after_rounds_up() {
        let entry = RateLimitEntry::new(0, 60_000);
        assert_eq!(entry.retry_after_secs(0), 60);
        assert_eq!(entry.retry_after_secs(1), 60);
        assert_eq!(entry.retry_after_secs(59_000), 1);
        assert_eq!(entry.retry_after_secs(58_999), 2);
    }

    #[test]
    fn test_retry_after_is_at_least_one_second() {
        let entry = RateLimitEntry::new(0, 60_000);
        assert_eq!(entry.retry_after_secs(59_999), 1);
        assert_eq!(entry.retry_after_secs(60_000), 1);
    }
}
