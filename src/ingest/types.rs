// src/ingest/types.rs
use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// One normalized headline pulled out of a feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub category: String,     // topic label of the feed it came from
    pub title: String,        // trimmed, CDATA already unwrapped
    pub link: String,         // identity key for dedup
    pub source: String,       // publisher name; fixed fallback when the feed omits it
    pub pub_date: String,     // original textual timestamp, published as-is
    pub published_at_ms: u64, // epoch millis; 0 = no usable timestamp
}

/// Counts from one pipeline run, for the summary log line and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub feeds: usize,
    pub parsed: usize,
    pub stale: usize,
    pub duplicates: usize,
    pub written: usize,
}

/// Fatal pipeline errors. Anything else (rejected entries, unparseable
/// documents) is handled locally and never aborts a run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("feed request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("feed endpoint {url} answered {status}")]
    FetchStatus { url: String, status: StatusCode },
    #[error("encoding news snapshot: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    #[error("writing news snapshot to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
