//! Sweep Tasks
//!
//! Background tasks that periodically reclaim memory from the cache and the
//! rate limiter. Neither component depends on these for correctness; they
//! only bound the growth of keys that are never touched again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ExpiringCache;
use crate::rate_limit::SlidingWindowLimiter;

/// Spawns a task that drops expired cache entries every
/// `cleanup_interval_secs` seconds.
///
/// The returned handle can be aborted during graceful shutdown.
pub fn spawn_cache_sweeper<V>(
    cache: Arc<ExpiringCache<V>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired();
            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}

/// Spawns a task that prunes the rate limiter every
/// `cleanup_interval_secs` seconds, dropping keys with no recent requests.
pub fn spawn_limiter_sweeper(
    limiter: Arc<SlidingWindowLimiter>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting rate limiter sweep task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = limiter.cleanup();
            if removed > 0 {
                info!("Rate limiter sweep: dropped {} idle keys", removed);
            } else {
                debug!(
                    "Rate limiter sweep: {} keys still active",
                    limiter.tracked_keys()
                );
            }
        }
    })
}
