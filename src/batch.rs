//! Search-driven batch summarization.
//!
//! One call turns a query into at most [`MAX_RESULTS`] summarized search
//! results:
//!
//! 1. **Search**: fetch and parse the news search page
//! 2. **Cap**: keep the first [`MAX_RESULTS`] candidates in page order; the
//!    rest are never scheduled
//! 3. **Enrich** (concurrent): fetch each linked page, take its lead
//!    paragraphs, summarize them through the shared inference pool
//! 4. **Assemble**: results come back in page order
//!
//! A candidate's failure is written into its own `summary` field and never
//! affects the others. The whole call runs under one deadline; a candidate
//! still in flight when it passes reports [`SUMMARY_FETCH_FAILED`].

use crate::fetcher::{FetchError, Fetcher};
use crate::models::{EnrichedSearchResult, SearchCandidate};
use crate::scrapers::article::{LEAD_PARAGRAPHS, lead_paragraphs};
use crate::scrapers::google_news::{parse_candidates, search_url};
use crate::sentinels::{SUMMARY_FETCH_FAILED, SUMMARY_NOT_AVAILABLE};
use crate::summarizer::Summarizer;
use futures::stream::{self, StreamExt};
use std::fmt;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, instrument, warn};

/// Most results one batch call returns.
pub const MAX_RESULTS: usize = 5;

/// The search page itself could not be loaded.
#[derive(Debug)]
pub struct SearchPageError(pub FetchError);

impl fmt::Display for SearchPageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search page unavailable: {}", self.0)
    }
}

impl std::error::Error for SearchPageError {}

#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    fetcher: Fetcher,
    summarizer: Summarizer,
    search_url: String,
    fetch_concurrency: usize,
    deadline: Duration,
}

impl BatchOrchestrator {
    pub fn new(
        fetcher: Fetcher,
        summarizer: Summarizer,
        search_url: impl Into<String>,
        fetch_concurrency: usize,
        deadline: Duration,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            search_url: search_url.into(),
            fetch_concurrency: fetch_concurrency.max(1),
            deadline,
        }
    }

    /// Search for `query` and summarize up to [`MAX_RESULTS`] linked articles.
    ///
    /// # Errors
    ///
    /// [`SearchPageError`] when the search page is unreachable, answers with
    /// a non-2xx status, or does not arrive before the deadline. Per-candidate
    /// failures are not errors.
    #[instrument(level = "info", skip(self))]
    pub async fn batch_summarize(&self, query: &str) -> Result<Vec<EnrichedSearchResult>, SearchPageError> {
        let started = Instant::now();
        let deadline = started + self.deadline;
        let page_url = search_url(&self.search_url, query);

        let markup = match timeout_at(deadline, self.fetcher.fetch(&page_url)).await {
            Ok(Ok(markup)) => markup,
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to fetch search page");
                return Err(SearchPageError(e));
            }
            Err(_) => {
                warn!("Search page did not arrive before the batch deadline");
                return Err(SearchPageError(FetchError::Transport("batch deadline exceeded".into())));
            }
        };

        let candidates = parse_candidates(&markup, &page_url);
        let found = candidates.len();

        let results: Vec<EnrichedSearchResult> = stream::iter(candidates.into_iter().take(MAX_RESULTS).enumerate())
            .map(|(index, candidate)| self.enrich(index, candidate, deadline))
            .buffered(self.fetch_concurrency)
            .collect()
            .await;

        info!(
            found,
            returned = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch summarization complete"
        );
        Ok(results)
    }

    #[instrument(level = "debug", skip(self, candidate, deadline), fields(link = %candidate.link))]
    async fn enrich(&self, index: usize, candidate: SearchCandidate, deadline: Instant) -> EnrichedSearchResult {
        let summary = match timeout_at(deadline, self.summarize_link(&candidate.link)).await {
            Ok(summary) => summary,
            Err(_) => {
                warn!(index, "Candidate still running at the batch deadline");
                SUMMARY_FETCH_FAILED.to_string()
            }
        };
        EnrichedSearchResult { candidate, summary }
    }

    async fn summarize_link(&self, link: &str) -> String {
        let markup = match self.fetcher.fetch(link).await {
            Ok(markup) => markup,
            Err(FetchError::Status(status)) => {
                debug!(status, "Linked page returned an error status");
                return SUMMARY_NOT_AVAILABLE.to_string();
            }
            Err(FetchError::Transport(e)) => {
                debug!(error = %e, "Linked page unreachable");
                return SUMMARY_FETCH_FAILED.to_string();
            }
        };

        let lead = lead_paragraphs(&markup, LEAD_PARAGRAPHS);
        if lead.trim().is_empty() {
            return SUMMARY_NOT_AVAILABLE.to_string();
        }
        self.summarizer.summarize(&lead).await
    }
}
