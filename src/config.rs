//! Service settings loaded from an optional YAML file.
//!
//! Every field has a default, so a missing file or a partial file are both
//! valid. The API credential is not part of this file; it comes from the
//! command line or the environment (see [`crate::cli::Cli`]).
//!
//! ```yaml
//! model_url: https://api-inference.huggingface.co/models/facebook/bart-large-cnn
//! fetch_timeout_secs: 15
//! batch_deadline_secs: 60
//! max_chars: 1500
//! inference_workers: 2
//! ```

use crate::scrapers::article::DEFAULT_MAX_CHARS;
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

/// Upper bound accepted for `max_retries`.
pub const MAX_RETRIES_LIMIT: usize = 10;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/101.0.4951.54 Safari/537.36";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Hosted summarization model endpoint.
    pub model_url: String,
    /// Google search endpoint used for news queries.
    pub search_url: String,
    /// Google News topic feed base; the section id is appended.
    pub topic_feed_url: String,
    /// `User-Agent` sent with every page fetch.
    pub user_agent: String,
    /// Per-request timeout for page fetches.
    pub fetch_timeout_secs: u64,
    /// Upper bound on one `/scrape-google-news` call.
    pub batch_deadline_secs: u64,
    /// Linked pages fetched at once in batch mode.
    pub fetch_concurrency: usize,
    /// Character budget for single-article extraction.
    pub max_chars: usize,
    /// Concurrent model invocations allowed process-wide.
    pub inference_workers: usize,
    /// Per-request timeout for model calls.
    pub model_timeout_secs: u64,
    /// Retries on transient model failures.
    pub max_retries: usize,
    /// First retry delay; doubles per attempt.
    pub retry_base_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_url: "https://api-inference.huggingface.co/models/facebook/bart-large-cnn"
                .to_string(),
            search_url: "https://www.google.com/search".to_string(),
            topic_feed_url: "https://news.google.com/news/rss/headlines/section/topic".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_secs: 15,
            batch_deadline_secs: 60,
            fetch_concurrency: 5,
            max_chars: DEFAULT_MAX_CHARS,
            inference_workers: 2,
            model_timeout_secs: 60,
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

impl Settings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn batch_deadline(&self) -> Duration {
        Duration::from_secs(self.batch_deadline_secs)
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    /// Pool deadline for one model call including all of its retries.
    pub fn model_call_deadline(&self) -> Duration {
        let attempts = u32::try_from(self.max_retries)
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        self.model_timeout()
            .checked_mul(attempts)
            .unwrap_or(Duration::MAX)
    }

    /// Parse settings from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        // An empty document deserializes to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No settings file given; using defaults");
            return Ok(Self::default());
        };
        let yaml = fs::read_to_string(path).await?;
        let settings = Self::from_yaml(&yaml)?;
        info!(path, "Loaded settings");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.inference_workers == 0 || self.fetch_concurrency == 0 {
            return Err("inference_workers and fetch_concurrency must be at least 1".into());
        }
        if self.fetch_timeout_secs == 0 || self.batch_deadline_secs == 0 || self.model_timeout_secs == 0 {
            return Err("timeouts must be at least one second".into());
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(format!("max_retries must be at most {}", MAX_RETRIES_LIMIT).into());
        }
        Ok(())
    }
}
