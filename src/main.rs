//! ELITEPRO News Builder — Binary Entrypoint
//! Fetches the configured RSS feeds once (or on an interval), aggregates
//! recent headlines, and publishes the JSON snapshot the site renders.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use elitepro_news_builder::config::NewsConfig;
use elitepro_news_builder::ingest::{self, fetch::HttpFetcher, scheduler};

/// Compact tracing to stderr; `RUST_LOG` overrides the `info` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// `NEWS_INTERVAL_SECS` > 0 keeps the process up and re-runs the pipeline;
/// unset, empty or 0 means one run and exit.
fn interval_from_env() -> Option<Duration> {
    let secs: u64 = std::env::var("NEWS_INTERVAL_SECS").ok()?.parse().ok()?;
    (secs > 0).then_some(Duration::from_secs(secs))
}

async fn run() -> anyhow::Result<()> {
    let cfg = NewsConfig::load_default().context("loading news config")?;
    let fetcher = HttpFetcher::new(&cfg).context("building http client")?;

    match interval_from_env() {
        Some(every) => {
            tracing::info!(every_secs = every.as_secs(), "starting interval mode");
            scheduler::spawn_interval_runs(Arc::new(fetcher), cfg, every).await??;
        }
        None => {
            let summary = ingest::run_once(&fetcher, &cfg, chrono::Utc::now()).await?;
            tracing::info!(
                path = %cfg.output_path.display(),
                written = summary.written,
                parsed = summary.parsed,
                stale = summary.stale,
                duplicates = summary.duplicates,
                "news snapshot written"
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "news build failed");
        std::process::exit(1);
    }
}
