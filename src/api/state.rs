//! Application State
//!
//! Everything the request pipeline shares, built once at startup and handed
//! to the router. No module keeps state of its own.

use std::sync::Arc;

use serde_json::Value;

use crate::auth::{authenticator_for, Authenticator};
use crate::cache::{CacheStore, SharedCache};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::rate_limit::{RateLimiter, SharedRateLimiter};

/// Application state shared across all handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    /// Memoized handler results
    pub cache: SharedCache<Value>,
    /// Per-client request quota
    pub limiter: SharedRateLimiter,
    /// Settings resolved at startup
    pub config: Arc<Config>,
    /// Resolves the user behind each request
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// Creates a new AppState from explicit parts.
    pub fn new(config: Config, clock: Arc<dyn Clock>, authenticator: Arc<dyn Authenticator>) -> Self {
        let cache = CacheStore::new(config.cache_max_entries, config.cache_default_ttl_ms);
        let limiter = RateLimiter::new(config.rate_limit_policy());

        Self {
            cache: SharedCache::new(cache, Arc::clone(&clock)),
            limiter: SharedRateLimiter::new(limiter, clock),
            config: Arc::new(config),
            authenticator,
        }
    }

    /// Creates a new AppState from configuration, on the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new AppState from configuration with a custom clock.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self::new(config.clone(), clock, authenticator_for(config))
    }
}
