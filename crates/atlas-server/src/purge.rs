//! Background sweeper for expired navigation cache entries.

use std::sync::Arc;
use std::time::Duration;

use atlas_nav::NavigationResolver;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn a task that purges expired cache entries every `period`.
///
/// The task runs until aborted.
pub(crate) fn spawn_cache_purge(
    resolver: Arc<NavigationResolver>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = resolver.cache().purge_expired();
            tracing::debug!(removed, remaining = resolver.cache().len(), "Cache sweep");
        }
    })
}
