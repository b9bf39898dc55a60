//! # News Snapshot Writer
//!
//! The pipeline's only durable output: one JSON document the static site
//! renders from. The shape is fixed by the consumer:
//! `{ updatedAt, hoursWindow, items: [{ category, title, link, source, pubDate }] }`.
//!
//! The write replaces the previous snapshot wholesale and goes through a
//! sibling temp file + rename, so readers never observe a half-written
//! document at the target path.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::types::{IngestError, NewsItem};

/// One published headline. The internal epoch field never leaves the
/// pipeline; only the original `pubDate` string is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedItem {
    pub category: String,
    pub title: String,
    pub link: String,
    pub source: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
}

impl From<&NewsItem> for PublishedItem {
    fn from(it: &NewsItem) -> Self {
        Self {
            category: it.category.clone(),
            title: it.title.clone(),
            link: it.link.clone(),
            source: it.source.clone(),
            pub_date: it.pub_date.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(rename = "hoursWindow")]
    pub hours_window: u64,
    pub items: Vec<PublishedItem>,
}

impl Snapshot {
    pub fn build(items: &[NewsItem], generated_at: DateTime<Utc>, hours_window: u64) -> Self {
        Self {
            updated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            hours_window,
            items: items.iter().map(PublishedItem::from).collect(),
        }
    }
}

/// Serialize and persist the snapshot at `path`, creating parent
/// directories as needed. Unconditional overwrite; errors are fatal to the
/// run and leave any previous snapshot in place.
pub fn write_snapshot(
    path: &Path,
    items: &[NewsItem],
    generated_at: DateTime<Utc>,
    hours_window: u64,
) -> Result<(), IngestError> {
    let snapshot = Snapshot::build(items, generated_at, hours_window);
    let body =
        serde_json::to_string_pretty(&snapshot).map_err(|e| IngestError::Encode { source: e })?;

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| IngestError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    // Stage next to the target so the rename stays on one filesystem.
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, &body).map_err(|e| IngestError::Write {
        path: tmp.clone(),
        source: e,
    })?;
    fs::rename(&tmp, path).map_err(|e| IngestError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
