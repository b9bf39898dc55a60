// tests/metrics_pipeline.rs
#![cfg(feature = "strict-metrics")]
use chrono::{TimeZone, Utc};
use elitepro_news_builder::config::{FeedSource, NewsConfig};
use elitepro_news_builder::ingest::{self, fetch::FixtureFetcher};
use metrics_exporter_prometheus::PrometheusBuilder;

#[tokio::test]
async fn pipeline_series_exposed_after_run() {
    // Install a local recorder for the test
    let builder = PrometheusBuilder::new();
    let handle = builder.install_recorder().expect("recorder");

    let url = "https://example.org/feed";
    let xml = std::fs::read_to_string("tests/fixtures/socorrismo.xml").expect("fixture");
    let dir = tempfile::tempdir().unwrap();

    let cfg = NewsConfig {
        feeds: vec![FeedSource::new("Socorrismo", url)],
        max_items: 12,
        window_hours: 72,
        output_path: dir.path().join("news.json"),
        user_agent: "test".into(),
        timeout_secs: 5,
    };
    let fetcher = FixtureFetcher::new().with_body(url, xml);
    let now = Utc.with_ymd_and_hms(2025, 8, 22, 12, 0, 0).unwrap();

    ingest::run_once(&fetcher, &cfg, now).await.expect("run");

    // Scrape metrics text and check series presence by substring
    let out = handle.render();
    assert!(out.contains("ingest_items_total"));
    assert!(out.contains("ingest_rejected_total"));
    assert!(out.contains("ingest_kept_total"));
    assert!(out.contains("ingest_stale_total"));
    assert!(out.contains("ingest_runs_total"));
    assert!(out.contains("ingest_parse_ms"));
}
