//! Shared Rate Limiter Handle
//!
//! Serializes every check behind one async mutex so concurrent requests from
//! the same client can never both slip under the quota.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::rate_limit::{Decision, RateLimitPolicy, RateLimiter};

// == Shared Rate Limiter ==
/// Cloneable handle to the process-wide limiter registry.
#[derive(Clone, Debug)]
pub struct SharedRateLimiter {
    inner: Arc<Mutex<RateLimiter>>,
    clock: Arc<dyn Clock>,
}

impl SharedRateLimiter {
    pub fn new(limiter: RateLimiter, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(limiter)),
            clock,
        }
    }

    /// Checks `client_id` at the current clock time.
    pub async fn check(&self, client_id: &str) -> Decision {
        let mut limiter = self.inner.lock().await;
        limiter.check(client_id, self.clock.now_ms())
    }

    /// Drops every expired window, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        self.inner.lock().await.purge_expired(now)
    }

    /// Requests admitted so far in `client_id`'s current window.
    pub async fn count(&self, client_id: &str) -> Option<u32> {
        self.inner.lock().await.entry(client_id).map(|entry| entry.count)
    }

    pub async fn policy(&self) -> RateLimitPolicy {
        self.inner.lock().await.policy()
    }

    /// Number of tracked clients.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
