//! Fixed strings that stand in for a result when producing it failed.
//!
//! Every failure in the pipeline is converted into data at the lowest layer
//! that can observe it. Upstream assembly code copies these values into the
//! response verbatim and never branches on them.

/// Summary text when the summarization model could not produce one.
pub const SUMMARY_FAILED: &str = "Error summarizing";

/// Title text when the headline model could not produce one.
pub const HEADLINE_FAILED: &str = "Error generating headline";

/// Batch summary when a candidate page answered with a non-2xx status
/// or had no paragraph text.
pub const SUMMARY_NOT_AVAILABLE: &str = "Summary not available";

/// Batch summary when a candidate page could not be reached at all.
pub const SUMMARY_FETCH_FAILED: &str = "Failed to fetch summary";

/// Body of the `/scrape-google-news` and `/scrape-gnewsclient` responses
/// when the listing page itself could not be loaded.
pub const NEWS_FETCH_FAILED: &str = "Failed to fetch news";

/// Detail of the 404 returned by `/get_news_from_url`.
pub const NO_ARTICLE_FOUND: &str = "No articles found or error fetching the URL.";

/// Placeholders for search result fields missing from the results page.
pub mod placeholder {
    pub const LINK: &str = "No link available";
    pub const TITLE: &str = "No title available";
    pub const SNIPPET: &str = "No snippet available";
    pub const DATE: &str = "No date available";
    pub const SOURCE: &str = "No source available";
}
