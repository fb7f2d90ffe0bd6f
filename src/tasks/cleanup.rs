//! Expiry Cleanup Task
//!
//! Background task that periodically drops expired cache entries and
//! finished rate-limit windows.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::rate_limit::SharedRateLimiter;

/// Spawns a background task that sweeps both registries every
/// `cleanup_interval_secs` seconds.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_cleanup_task(state.cache.clone(), state.limiter.clone(), 60);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(
    cache: SharedCache<V>,
    limiter: SharedRateLimiter,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expiry cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let expired_entries = cache.purge_expired().await;
            let expired_windows = limiter.purge_expired().await;

            if expired_entries > 0 || expired_windows > 0 {
                info!(
                    expired_entries,
                    expired_windows, "Cleanup removed expired cache entries and rate limit windows"
                );
            } else {
                debug!("Cleanup: nothing expired");
            }
        }
    })
}
