//! Periodic metrics reporting.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::engine::Engine;

/// Log and broadcast a metrics snapshot every `period` until aborted.
pub(crate) fn spawn(engine: Arc<Engine>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let snapshot = engine.publish_metrics().await;
            tracing::info!(
                total_posts = snapshot.total_posts,
                total_comments = snapshot.total_comments,
                total_votes = snapshot.total_votes,
                active_users = snapshot.active_users,
                total_messages = snapshot.total_messages,
                start_time = %snapshot.start_time.to_rfc3339(),
                "Metrics report"
            );
        }
    })
}
