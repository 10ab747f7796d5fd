//! TTL Cleanup Task
//!
//! Background task that periodically removes expired local cache entries.

use std::sync::PoisonError;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::config::MIN_INTERVAL_SECS;

/// Spawns a background task that sweeps expired entries every
/// `cleanup_interval_secs` seconds, never more often than once a second.
///
/// Returns the task handle so it can be aborted on shutdown.
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let cleanup_interval_secs = cleanup_interval_secs.max(MIN_INTERVAL_SECS);
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .cleanup_expired();

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
