//! # News Pipeline Configuration
//!
//! Immutable run configuration: the feed registry plus the output-contract
//! knobs (item cap, recency window, artifact path). Resolved once at startup
//! and passed by reference into the pipeline; nothing here changes during a
//! run.
//!
//! Load order:
//! 1) `$NEWS_CONFIG_PATH` (must exist when set)
//! 2) `config/news.toml`
//! 3) built-in seed defaults (the reference deployment)

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/news.toml";
pub const ENV_CONFIG_PATH: &str = "NEWS_CONFIG_PATH";

const GOOGLE_NEWS_SEARCH_BASE: &str = "https://news.google.com/rss/search";

/// One (topic, endpoint) pair the pipeline polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub category: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(category: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            url: url.into(),
        }
    }

    /// Build a Google News RSS search endpoint for `query`, localized to
    /// `lang`/`country` (e.g. "es"/"ES").
    pub fn google_news_search(
        category: impl Into<String>,
        query: &str,
        lang: &str,
        country: &str,
    ) -> Self {
        let ceid = format!("{country}:{lang}");
        let url = reqwest::Url::parse_with_params(
            GOOGLE_NEWS_SEARCH_BASE,
            [
                ("q", query),
                ("hl", lang),
                ("gl", country),
                ("ceid", ceid.as_str()),
            ],
        )
        .expect("google news base url is valid");
        Self {
            category: category.into(),
            url: url.to_string(),
        }
    }
}

/// Everything a pipeline run needs, resolved and immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsConfig {
    pub feeds: Vec<FeedSource>,
    pub max_items: usize,
    pub window_hours: u64,
    pub output_path: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl NewsConfig {
    /// The reference deployment: two Spanish-language Google News topics,
    /// 72 h window, 12 items, artifact under `assets/`.
    pub fn default_seed() -> Self {
        Self {
            feeds: vec![
                FeedSource::google_news_search(
                    "Socorrismo",
                    r#"socorrismo OR "salvamento acuático" OR "rescate acuático" OR lifeguard OR "seguridad acuática""#,
                    "es",
                    "ES",
                ),
                FeedSource::google_news_search(
                    "Deporte",
                    r#"deporte OR natación OR triatlón OR "aguas abiertas""#,
                    "es",
                    "ES",
                ),
            ],
            max_items: 12,
            window_hours: 72,
            output_path: PathBuf::from("assets/news.json"),
            user_agent: "ElitePRO-News-Bot/1.0".to_string(),
            timeout_secs: 15,
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: ConfigFile = toml::from_str(s).context("parsing news config toml")?;
        raw.resolve()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading news config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using env var + fallbacks:
    /// 1) $NEWS_CONFIG_PATH
    /// 2) config/news.toml
    /// 3) built-in seed defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("NEWS_CONFIG_PATH points to non-existent path"));
        }
        let toml_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        Ok(Self::default_seed())
    }
}

/// Raw TOML shape; `resolve()` turns it into the immutable model.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    feeds: Vec<FeedSpec>,
    #[serde(default = "default_max_items")]
    max_items: usize,
    #[serde(default = "default_window_hours")]
    window_hours: u64,
    #[serde(default = "default_output_path")]
    output_path: PathBuf,
    #[serde(default = "default_user_agent")]
    user_agent: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

/// One feed entry as written in the config file: either a full `url` or a
/// Google News `query` (with optional `lang`/`country`).
#[derive(Debug, Deserialize)]
struct FeedSpec {
    category: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default = "default_lang")]
    lang: String,
    #[serde(default = "default_country")]
    country: String,
}

fn default_max_items() -> usize {
    12
}
fn default_window_hours() -> u64 {
    72
}
fn default_output_path() -> PathBuf {
    PathBuf::from("assets/news.json")
}
fn default_user_agent() -> String {
    "ElitePRO-News-Bot/1.0".to_string()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_lang() -> String {
    "es".to_string()
}
fn default_country() -> String {
    "ES".to_string()
}

impl ConfigFile {
    fn resolve(self) -> Result<NewsConfig> {
        if self.feeds.is_empty() {
            return Err(anyhow!("news config lists no feeds"));
        }
        let mut feeds = Vec::with_capacity(self.feeds.len());
        for spec in self.feeds {
            feeds.push(spec.resolve()?);
        }
        Ok(NewsConfig {
            feeds,
            max_items: self.max_items,
            window_hours: self.window_hours,
            output_path: self.output_path,
            user_agent: self.user_agent,
            timeout_secs: self.timeout_secs,
        })
    }
}

impl FeedSpec {
    fn resolve(self) -> Result<FeedSource> {
        match (self.url, self.query) {
            (Some(url), _) => Ok(FeedSource::new(self.category, url)),
            (None, Some(q)) => Ok(FeedSource::google_news_search(
                self.category,
                &q,
                &self.lang,
                &self.country,
            )),
            (None, None) => Err(anyhow!(
                "feed '{}' needs either a url or a query",
                self.category
            )),
        }
    }
}
