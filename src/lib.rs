// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod artifact;
pub mod config;
pub mod ingest;

// ---- Re-exports for stable public API ----
pub use crate::artifact::{PublishedItem, Snapshot};
pub use crate::config::{FeedSource, NewsConfig};
pub use crate::ingest::run_once;
pub use crate::ingest::types::{IngestError, NewsItem, RunSummary};
