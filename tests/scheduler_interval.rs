// tests/scheduler_interval.rs
use std::sync::Arc;
use std::time::Duration;

use elitepro_news_builder::artifact::Snapshot;
use elitepro_news_builder::config::{FeedSource, NewsConfig};
use elitepro_news_builder::ingest::fetch::{FeedFetch, FixtureFetcher};
use elitepro_news_builder::ingest::scheduler::spawn_interval_runs;

#[tokio::test]
async fn interval_mode_rewrites_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("news.json");

    let url = "https://example.org/feed";
    let xml = r#"<rss version="2.0"><channel>
  <item><title>Siempre fresco</title><link>https://example.org/f1</link><pubDate>Fri, 22 Aug 2025 07:00:00 GMT</pubDate></item>
</channel></rss>"#;

    let cfg = NewsConfig {
        feeds: vec![FeedSource::new("Deporte", url)],
        max_items: 12,
        window_hours: 72,
        output_path: out.clone(),
        user_agent: "test".into(),
        timeout_secs: 5,
    };
    let fetcher: Arc<dyn FeedFetch> = Arc::new(FixtureFetcher::new().with_body(url, xml));

    let handle = spawn_interval_runs(fetcher, cfg, Duration::from_millis(20));

    // First tick fires immediately; give it a little room.
    tokio::time::sleep(Duration::from_millis(150)).await;
    handle.abort();

    let snap: Snapshot = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(snap.hours_window, 72);
}
