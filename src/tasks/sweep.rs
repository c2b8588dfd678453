//! Periodic sweep of expired cache entries and idle rate-limit keys.
//!
//! Reads stay correct without this task; it only bounds memory growth.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns a background task that periodically sweeps the shared state.
///
/// Each pass removes expired entries from every content cache and forgets
/// rate-limit keys with no admission inside the longest policy window.
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_sweep_task(state: AppState, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);
    let idle_window = state.longest_window();

    tokio::spawn(async move {
        info!(interval_secs, "Starting sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let expired = state.caches.cleanup_expired().await;
            let idle_keys = state.limiter.write().await.purge_idle(idle_window);

            if expired > 0 || idle_keys > 0 {
                info!(expired, idle_keys, "Sweep removed stale state");
            } else {
                debug!("Sweep: nothing to remove");
            }
        }
    })
}
