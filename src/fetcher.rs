//! HTTP page fetching.
//!
//! A single [`Fetcher`] is built at startup and shared by every request. It
//! sends a browser-like `User-Agent`, follows a bounded number of redirects
//! and gives up after the configured timeout. Failures are reported as a
//! [`FetchError`] that only records which kind of failure happened; the
//! callers convert it to "no content".

use reqwest::{Client, redirect};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Why a page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    Status(u16),
    /// DNS, connect, TLS, timeout, invalid URL or body decode failure.
    Transport(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP status {}", code),
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Transport(format!("timed out: {}", e))
        } else {
            Self::Transport(e.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build a fetcher that identifies as `user_agent` and abandons any
    /// request that takes longer than `timeout`.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the body of `url` as text.
    ///
    /// # Returns
    ///
    /// The decoded body of a 2xx response, or a [`FetchError`] for anything else.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            FetchError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Non-success status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
