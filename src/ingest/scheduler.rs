// src/ingest/scheduler.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::NewsConfig;
use crate::ingest::fetch::FeedFetch;

/// Spawn a supervisor that re-runs the full pipeline on a fixed interval,
/// first run immediate.
///
/// Every tick is a fresh, self-contained run over the same immutable
/// config; the task ends with the first fatal error. Opt-in via
/// `NEWS_INTERVAL_SECS`, the default mode being a single run.
pub fn spawn_interval_runs(
    fetcher: Arc<dyn FeedFetch>,
    cfg: NewsConfig,
    interval: Duration,
) -> JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let summary =
                crate::ingest::run_once(fetcher.as_ref(), &cfg, chrono::Utc::now()).await?;

            tracing::info!(
                target: "ingest",
                written = summary.written,
                parsed = summary.parsed,
                stale = summary.stale,
                duplicates = summary.duplicates,
                "scheduled run complete"
            );
        }
    })
}
