//! Single-article digest: URL in, headline and summary out.
//!
//! Fetch the page, run the extraction cascade with the configured character
//! budget, then generate the headline and the summary concurrently. Both go
//! through the shared inference pool, so they still respect its bound.

use crate::fetcher::Fetcher;
use crate::headline::HeadlineGenerator;
use crate::models::{ArticleContent, SummaryResult};
use crate::scrapers::article::ContentExtractor;
use crate::summarizer::Summarizer;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct ArticleDigester {
    fetcher: Fetcher,
    extractor: Arc<ContentExtractor>,
    summarizer: Summarizer,
    headline: HeadlineGenerator,
    max_chars: usize,
}

impl ArticleDigester {
    pub fn new(
        fetcher: Fetcher,
        extractor: Arc<ContentExtractor>,
        summarizer: Summarizer,
        headline: HeadlineGenerator,
        max_chars: usize,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            summarizer,
            headline,
            max_chars,
        }
    }

    /// Fetch and extract `url`.
    ///
    /// Anything that prevents extraction (a non-http(s) URL, a transport
    /// error, a non-2xx status, a page without paragraphs) yields an empty
    /// [`ArticleContent`].
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_article(&self, url: &str) -> ArticleContent {
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => {
                warn!("Rejected URL that is not absolute http(s)");
                return ArticleContent::new(url, String::new());
            }
        }

        match self.fetcher.fetch(url).await {
            Ok(markup) => {
                let article = self.extractor.extract_article(url, &markup, self.max_chars);
                info!(chars = article.length, "Extracted article");
                article
            }
            Err(e) => {
                warn!(error = %e, "Error fetching news");
                ArticleContent::new(url, String::new())
            }
        }
    }

    /// Headline and summary for the article at `url`.
    ///
    /// # Returns
    ///
    /// `None` when nothing could be extracted. Model failures do not make
    /// this `None`; they show up as sentinel strings inside the result.
    #[instrument(level = "info", skip(self))]
    pub async fn digest(&self, url: &str) -> Option<SummaryResult> {
        let article = self.fetch_article(url).await;
        if article.is_empty() {
            return None;
        }

        let text = article.extracted_text.trim();
        let (title, summary) = tokio::join!(self.headline.headline(text), self.summarizer.summarize(text));
        Some(SummaryResult { title, summary })
    }
}
