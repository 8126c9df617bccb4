//! Data models shared by the extraction, summarization and batch pipelines.
//!
//! This module defines the core data structures used throughout the service:
//! - [`ArticleContent`]: Cleaned and bounded body text of a single article
//! - [`SummaryResult`]: Generated headline and summary for one article
//! - [`SearchCandidate`]: One entry parsed from a search-results page
//! - [`EnrichedSearchResult`]: A candidate plus the summary of its linked page
//! - [`TopicItem`]: One entry of a topic listing feed
//!
//! All of them are request-scoped. Nothing here is cached or persisted.

use serde::{Deserialize, Serialize};

/// Body text extracted from an article page.
///
/// `length` is counted in characters, not bytes, and always equals the
/// character count of `extracted_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    /// The URL the markup was fetched from.
    pub source_url: String,
    /// Whitespace-collapsed, boilerplate-free, truncated body text.
    pub extracted_text: String,
    /// Number of characters in `extracted_text`.
    pub length: usize,
}

impl ArticleContent {
    /// Wrap extracted text, computing its character length.
    pub fn new(source_url: impl Into<String>, extracted_text: String) -> Self {
        let length = extracted_text.chars().count();
        Self {
            source_url: source_url.into(),
            extracted_text,
            length,
        }
    }

    /// `true` when extraction found no paragraph text at all.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Machine-generated headline and summary.
///
/// On generation failure the fields hold the sentinels from
/// [`crate::sentinels`] rather than being absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SummaryResult {
    pub title: String,
    pub summary: String,
}

/// One result parsed from a news search page.
///
/// Missing fields hold the placeholders from [`crate::sentinels::placeholder`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchCandidate {
    pub link: String,
    pub title: String,
    pub snippet: String,
    pub date: String,
    pub source: String,
}

/// A [`SearchCandidate`] with the summary of the page it links to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnrichedSearchResult {
    #[serde(flatten)]
    pub candidate: SearchCandidate,
    pub summary: String,
}

/// One entry of a topic listing. `summary` carries the article link because
/// the feed offers no summary text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TopicItem {
    pub title: String,
    pub summary: String,
}

/// `{"news": ...}` envelope used by every listing route.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewsEnvelope<T> {
    pub news: T,
}

/// `{"error": ...}` envelope returned when a listing page could not be loaded.
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// `{"detail": ...}` body of client-facing error responses.
#[derive(Debug, Deserialize, Serialize)]
pub struct DetailEnvelope {
    pub detail: String,
}
