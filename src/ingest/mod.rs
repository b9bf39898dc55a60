// src/ingest/mod.rs
pub mod extract;
pub mod fetch;
pub mod scheduler;
pub mod types;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

use crate::artifact;
use crate::config::NewsConfig;
use crate::ingest::fetch::FeedFetch;
use crate::ingest::types::{IngestError, NewsItem, RunSummary};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_items_total", "Items accepted by the extractor.");
        describe_counter!(
            "ingest_rejected_total",
            "Item blocks dropped by the extractor's rejection rules."
        );
        describe_counter!("ingest_kept_total", "Items written to the snapshot.");
        describe_counter!(
            "ingest_stale_total",
            "Items dropped by the recency window."
        );
        describe_counter!("ingest_dedup_total", "Items dropped as duplicate links.");
        describe_counter!("ingest_feed_errors_total", "Feed fetch/parse failures.");
        describe_counter!("ingest_runs_total", "Completed pipeline runs.");
        describe_histogram!("ingest_fetch_ms", "Feed fetch time in milliseconds.");
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!("ingest_last_run_ts", "Unix ts of the last completed run.");
    });
}

/// Keep iff the publish instant sits within `window_hours` of `now_ms`, on
/// either side. Past-beyond-window and future-beyond-window both drop.
pub fn within_window(now_ms: u64, published_at_ms: u64, window_hours: u64) -> bool {
    let window_ms = window_hours.saturating_mul(3_600_000);
    now_ms.saturating_sub(published_at_ms) <= window_ms
        && published_at_ms.saturating_sub(now_ms) <= window_ms
}

/// Order newest-first, keep the first occurrence of every link, cap at
/// `max_items`. The sort is stable, so timestamp ties keep their encounter
/// order and identical input yields identical output.
/// Returns (kept, duplicates_dropped).
pub fn dedup_rank(mut items: Vec<NewsItem>, max_items: usize) -> (Vec<NewsItem>, usize) {
    items.sort_by(|a, b| b.published_at_ms.cmp(&a.published_at_ms));

    let mut seen: HashSet<String> = HashSet::new();
    let mut kept: Vec<NewsItem> = Vec::with_capacity(max_items.min(items.len()));
    let mut duplicates = 0usize;

    for it in items {
        if kept.len() >= max_items {
            break;
        }
        if !seen.insert(it.link.clone()) {
            duplicates += 1;
            continue;
        }
        kept.push(it);
    }

    (kept, duplicates)
}

/// Run the whole pipeline once: fetch every configured feed in order,
/// extract and window-filter its items, dedup/rank the union, write the
/// snapshot.
///
/// The first failed fetch, or a failed write, aborts the run with nothing
/// written. An unparseable feed document is not fatal; that feed just
/// contributes zero items.
pub async fn run_once(
    fetcher: &dyn FeedFetch,
    cfg: &NewsConfig,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<RunSummary, IngestError> {
    ensure_metrics_described();

    let now_ms = now.timestamp_millis().max(0) as u64;

    let mut fresh: Vec<NewsItem> = Vec::new();
    let mut parsed = 0usize;
    let mut stale = 0usize;

    for feed in &cfg.feeds {
        tracing::debug!(category = %feed.category, url = %feed.url, "fetching feed");
        let body = match fetcher.fetch(&feed.url).await {
            Ok(b) => b,
            Err(e) => {
                counter!("ingest_feed_errors_total").increment(1);
                return Err(e);
            }
        };

        let items = match extract::parse_feed(&feed.category, &body) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = ?e, category = %feed.category, "unparseable feed, skipping");
                counter!("ingest_feed_errors_total").increment(1);
                Vec::new()
            }
        };
        tracing::debug!(category = %feed.category, items = items.len(), "extracted feed");

        parsed += items.len();
        for item in items {
            if within_window(now_ms, item.published_at_ms, cfg.window_hours) {
                fresh.push(item);
            } else {
                stale += 1;
            }
        }
    }

    let (kept, duplicates) = dedup_rank(fresh, cfg.max_items);

    artifact::write_snapshot(&cfg.output_path, &kept, now, cfg.window_hours)?;

    // Telemetry
    counter!("ingest_kept_total").increment(kept.len() as u64);
    counter!("ingest_stale_total").increment(stale as u64);
    counter!("ingest_dedup_total").increment(duplicates as u64);
    counter!("ingest_runs_total").increment(1);
    gauge!("ingest_last_run_ts").set(now.timestamp() as f64);

    Ok(RunSummary {
        feeds: cfg.feeds.len(),
        parsed,
        stale,
        duplicates,
        written: kept.len(),
    })
}
