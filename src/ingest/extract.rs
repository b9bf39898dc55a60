// src/ingest/extract.rs
//! RSS item extraction: one feed document in, normalized `NewsItem`s out.
//!
//! quick-xml drives the parsing, so CDATA wrappers, attributes on opening
//! tags and unknown child elements are the parser's problem, not ours.
//! What stays ours: the rejection rules (no title, no link, no usable
//! timestamp) and the epoch-millisecond normalization of `pubDate`.

use anyhow::{Context, Result};
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::ingest::types::NewsItem;

/// Publisher label used when a feed entry carries no `<source>`.
pub const SOURCE_FALLBACK: &str = "Google News";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    // A channel with no <item> elements is a valid, empty feed.
    #[serde(default, rename = "item")]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source: Option<String>,
}

/// Parse one feed document into accepted items for `category`.
///
/// Entries missing a title or link, or without a parseable publish date,
/// are dropped silently. A document that is not XML at all is an error the
/// pipeline downgrades to "this feed contributed nothing".
pub fn parse_feed(category: &str, xml: &str) -> Result<Vec<NewsItem>> {
    let t0 = std::time::Instant::now();
    let xml_clean = scrub_html_entities(xml);
    let rss: Rss = from_str(&xml_clean).context("parsing rss xml")?;

    let total = rss.channel.item.len();
    let mut out = Vec::with_capacity(total);
    for it in rss.channel.item {
        let title = it.title.as_deref().unwrap_or_default().trim().to_string();
        let link = it.link.as_deref().unwrap_or_default().trim().to_string();
        let pub_date = it.pub_date.as_deref().unwrap_or_default().trim().to_string();
        let published_at_ms = parse_pub_date_ms(&pub_date);
        if title.is_empty() || link.is_empty() || published_at_ms == 0 {
            continue;
        }

        let source = match it.source.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => SOURCE_FALLBACK.to_string(),
        };

        out.push(NewsItem {
            category: category.to_string(),
            title,
            link,
            source,
            pub_date,
            published_at_ms,
        });
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);
    counter!("ingest_items_total").increment(out.len() as u64);
    counter!("ingest_rejected_total").increment((total - out.len()) as u64);
    Ok(out)
}

/// `pubDate` → epoch milliseconds. RSS feeds use RFC 2822; some emit
/// RFC 3339 instead, so try both. 0 marks anything unusable (missing,
/// garbage, pre-epoch).
fn parse_pub_date_ms(ts: &str) -> u64 {
    chrono::DateTime::parse_from_rfc2822(ts)
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(ts))
        .ok()
        .map(|dt| dt.timestamp_millis())
        .and_then(|x| u64::try_from(x).ok())
        .unwrap_or(0)
}

/// Feeds routinely embed HTML-only named entities in otherwise well-formed
/// XML; rewrite the usual suspects before the parser sees them.
fn scrub_html_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
