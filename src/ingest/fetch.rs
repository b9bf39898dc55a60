// src/ingest/fetch.rs
//! Feed retrieval behind a small async seam, so the pipeline runs the same
//! against live HTTP and against canned bodies in tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use metrics::histogram;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use crate::config::NewsConfig;
use crate::ingest::types::IngestError;

/// Accept header sent with every feed request; favors RSS/XML bodies.
pub const ACCEPT_RSS: &str = "application/rss+xml, application/xml;q=0.9,*/*;q=0.8";

#[async_trait]
pub trait FeedFetch: Send + Sync {
    /// One retrieval of one endpoint. No retries, no caching; redirects are
    /// whatever the transport does by default.
    async fn fetch(&self, url: &str) -> Result<String, IngestError>;
}

/// Live fetcher: one shared client with the identifying user-agent, bounded
/// by a request timeout so a hung feed cannot wedge the run.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(cfg: &NewsConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&cfg.user_agent)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, IngestError> {
        let t0 = std::time::Instant::now();
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_RSS)
            .send()
            .await
            .map_err(|e| IngestError::Fetch {
                url: url.to_string(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(IngestError::FetchStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = resp.text().await.map_err(|e| IngestError::Fetch {
            url: url.to_string(),
            source: e,
        })?;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("ingest_fetch_ms").record(ms);
        Ok(body)
    }
}

/// Canned fetcher for tests: URL → body, anything else → HTTP 404.
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    bodies: HashMap<String, String>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

#[async_trait]
impl FeedFetch for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<String, IngestError> {
        match self.bodies.get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(IngestError::FetchStatus {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}
