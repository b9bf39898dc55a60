// tests/artifact_write.rs
use chrono::{TimeZone, Utc};
use elitepro_news_builder::artifact::{write_snapshot, Snapshot};
use elitepro_news_builder::ingest::types::NewsItem;

fn item(link: &str, ts: u64) -> NewsItem {
    NewsItem {
        category: "Deporte".into(),
        title: "La selección de natación bate el récord nacional".into(),
        link: link.into(),
        source: "Marca".into(),
        pub_date: "Thu, 21 Aug 2025 18:20:00 GMT".into(),
        published_at_ms: ts,
    }
}

#[test]
fn creates_parent_dirs_and_publishes_contract_keys() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("deep").join("assets").join("news.json");
    let now = Utc.with_ymd_and_hms(2025, 8, 22, 12, 0, 0).unwrap();

    write_snapshot(
        &out,
        &[item("https://example.org/a", 1_755_800_400_000)],
        now,
        72,
    )
    .unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["updatedAt"], "2025-08-22T12:00:00.000Z");
    assert_eq!(v["hoursWindow"], 72);
    assert_eq!(v["items"][0]["category"], "Deporte");
    assert_eq!(v["items"][0]["pubDate"], "Thu, 21 Aug 2025 18:20:00 GMT");
    assert!(v["items"][0].get("published_at_ms").is_none());

    // Pretty-printed, like the snapshot the site already serves.
    assert!(body.starts_with("{\n  \"updatedAt\""));
}

#[test]
fn overwrites_previous_snapshot_wholesale_and_leaves_no_temp() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("news.json");
    let now = Utc.with_ymd_and_hms(2025, 8, 22, 12, 0, 0).unwrap();

    write_snapshot(&out, &[item("https://example.org/old", 10)], now, 72).unwrap();
    write_snapshot(&out, &[item("https://example.org/new", 20)], now, 72).unwrap();

    let snap: Snapshot = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(snap.items.len(), 1);
    assert_eq!(snap.items[0].link, "https://example.org/new");

    // Only the snapshot itself remains in the directory.
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn empty_result_set_is_a_valid_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("news.json");
    let now = Utc.with_ymd_and_hms(2025, 8, 22, 12, 0, 0).unwrap();

    write_snapshot(&out, &[], now, 72).unwrap();

    let snap: Snapshot = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert!(snap.items.is_empty());
    assert_eq!(snap.updated_at, "2025-08-22T12:00:00.000Z");
}
