//! Fixed-Window Rate Limiter
//!
//! Admits or rejects requests per client identifier against a quota that
//! resets entirely at the end of each client's window.

use std::collections::HashMap;

use tracing::debug;

use crate::rate_limit::RateLimitEntry;

/// Identifier used when a request carries no usable client identity.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Default window length (1 minute)
pub const DEFAULT_WINDOW_MS: u64 = 60 * 1000;

/// Default requests admitted per window
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

// == Policy ==
/// Window length and quota applied to every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Window length in milliseconds
    pub window_ms: u64,
    /// Requests admitted per window
    pub max_requests: u32,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            max_requests: DEFAULT_MAX_REQUESTS,
        }
    }
}

// == Decision ==
/// Outcome of a single [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request admitted; `remaining` more fit in the current window.
    Allow { remaining: u32 },
    /// Quota exhausted; the window resets in `retry_after_secs`.
    Reject { retry_after_secs: u64 },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }
}

// == Rate Limiter ==
/// Registry of per-client fixed windows.
#[derive(Debug)]
pub struct RateLimiter {
    /// Client identifier to current window
    entries: HashMap<String, RateLimitEntry>,
    policy: RateLimitPolicy,
    /// Next time `check` sweeps expired windows inline
    next_sweep_at: u64,
}

impl RateLimiter {
    // == Constructor ==
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
            next_sweep_at: 0,
        }
    }

    // == Check ==
    /// Counts one request from `client_id` at `now` and decides whether to
    /// admit it.
    ///
    /// An empty identifier is treated as [`UNKNOWN_CLIENT`]. A rejected
    /// request does not count against the quota.
    pub fn check(&mut self, client_id: &str, now: u64) -> Decision {
        if now >= self.next_sweep_at {
            self.purge_expired(now);
            self.next_sweep_at = now.saturating_add(self.policy.window_ms);
        }

        let client_id = if client_id.is_empty() {
            UNKNOWN_CLIENT
        } else {
            client_id
        };
        let RateLimitPolicy {
            window_ms,
            max_requests,
        } = self.policy;

        let entry = self
            .entries
            .entry(client_id.to_string())
            .and_modify(|entry| {
                if entry.is_expired_at(now) {
                    *entry = RateLimitEntry::new(now, window_ms);
                }
            })
            .or_insert_with(|| RateLimitEntry::new(now, window_ms));

        if entry.count >= max_requests {
            let retry_after_secs = entry.retry_after_secs(now);
            debug!(client_id, retry_after_secs, "Rate limit exceeded");
            return Decision::Reject { retry_after_secs };
        }

        entry.count += 1;
        Decision::Allow {
            remaining: max_requests - entry.count,
        }
    }

    // == Purge Expired ==
    /// Drops every window that ended before `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    /// Current window for `client_id`, expired or not.
    pub fn entry(&self, client_id: &str) -> Option<&RateLimitEntry> {
        self.entries.get(client_id)
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Number of tracked clients.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitPolicy::default())
    }
}
