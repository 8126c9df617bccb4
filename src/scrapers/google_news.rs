//! Google News search results scraper.
//!
//! Queries the news vertical of Google search (`tbm=nws`) and parses each
//! result block into a [`SearchCandidate`].
//!
//! # Result markup
//!
//! | Field | Selector |
//! |-------|----------|
//! | block | `div.SoaBEf` |
//! | link | first `a[href]` in the block |
//! | title | `div.MBeuO` |
//! | snippet | `.GI74Re` |
//! | date | `.LfVVr` |
//! | source | `.NUnG9d span` |
//!
//! A field missing from a block takes its placeholder from
//! [`crate::sentinels::placeholder`]; the block itself is never dropped.

use crate::models::SearchCandidate;
use crate::sentinels::placeholder;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

static RESULT_BLOCK: Lazy<Selector> = Lazy::new(|| Selector::parse("div.SoaBEf").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("div.MBeuO").unwrap());
static SNIPPET: Lazy<Selector> = Lazy::new(|| Selector::parse(".GI74Re").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse(".LfVVr").unwrap());
static SOURCE: Lazy<Selector> = Lazy::new(|| Selector::parse(".NUnG9d span").unwrap());

/// Build the news search URL for `query` against `search_url`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     search_url("https://www.google.com/search", "rust lang"),
///     "https://www.google.com/search?q=rust%20lang&gl=us&tbm=nws&num=100"
/// );
/// ```
pub fn search_url(search_url: &str, query: &str) -> String {
    format!(
        "{}?q={}&gl=us&tbm=nws&num=100",
        search_url,
        urlencoding::encode(query)
    )
}

/// Parse every result block of a search page, in page order.
///
/// Relative links are resolved against `page_url` when it parses as a URL.
#[instrument(level = "debug", skip(markup), fields(markup_bytes = markup.len()))]
pub fn parse_candidates(markup: &str, page_url: &str) -> Vec<SearchCandidate> {
    let base = Url::parse(page_url).ok();
    let document = Html::parse_document(markup);

    let candidates: Vec<SearchCandidate> = document
        .select(&RESULT_BLOCK)
        .map(|block| SearchCandidate {
            link: link_of(&block, base.as_ref()),
            title: text_of(&block, &TITLE).unwrap_or_else(|| placeholder::TITLE.to_string()),
            snippet: text_of(&block, &SNIPPET).unwrap_or_else(|| placeholder::SNIPPET.to_string()),
            date: text_of(&block, &DATE).unwrap_or_else(|| placeholder::DATE.to_string()),
            source: text_of(&block, &SOURCE).unwrap_or_else(|| placeholder::SOURCE.to_string()),
        })
        .collect();

    debug!(count = candidates.len(), "Parsed search candidates");
    candidates
}

fn link_of(block: &ElementRef<'_>, base: Option<&Url>) -> String {
    let Some(href) = block
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
    else {
        return placeholder::LINK.to_string();
    };

    match base.and_then(|b| b.join(href).ok()) {
        Some(resolved) => resolved.to_string(),
        None => href.to_string(),
    }
}

fn text_of(block: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    block
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}
