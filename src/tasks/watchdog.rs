//! Source Liveness Watchdog
//!
//! Background task that marks the event source down when it goes quiet.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::MIN_INTERVAL_SECS;
use crate::monitor::SourceMonitor;

/// Spawns a task that checks every `check_interval_secs` seconds whether the
/// source signalled within the last `timeout_secs` seconds.
pub fn spawn_watchdog_task(
    monitor: Arc<SourceMonitor>,
    check_interval_secs: u64,
    timeout_secs: u64,
) -> JoinHandle<()> {
    let check_interval_secs = check_interval_secs.max(MIN_INTERVAL_SECS);
    let interval = Duration::from_secs(check_interval_secs);
    // chrono rejects second counts above i64::MAX / 1000
    let timeout_secs_i64 = i64::try_from(timeout_secs)
        .unwrap_or(i64::MAX)
        .min(i64::MAX / 1000);
    let timeout = chrono::Duration::seconds(timeout_secs_i64);

    tokio::spawn(async move {
        info!(
            "Starting source watchdog: checking every {}s, timeout {}s",
            check_interval_secs, timeout_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            if monitor.check_staleness(Utc::now(), timeout) {
                warn!(
                    "No cache events for more than {} seconds, source marked down",
                    timeout_secs
                );
            } else {
                debug!(status = ?monitor.status(), "Source watchdog check");
            }
        }
    })
}
