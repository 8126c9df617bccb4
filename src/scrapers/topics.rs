//! Google News topic listings.
//!
//! Reads the RSS feed of a Google News topic section and lists its items as
//! `{title, summary}` pairs where `summary` is the article link; the feed
//! carries no summary text of its own. Nothing is fetched from the linked
//! articles.

use crate::fetcher::{FetchError, Fetcher};
use crate::models::TopicItem;
use serde::Deserialize;
use std::fmt;
use tracing::{info, instrument, warn};

/// Topic used when the caller does not name one.
pub const DEFAULT_TOPIC: &str = "Technology";

/// Friendly topic names and their feed section ids.
const SECTIONS: &[(&str, &str)] = &[
    ("world", "WORLD"),
    ("nation", "NATION"),
    ("business", "BUSINESS"),
    ("technology", "TECHNOLOGY"),
    ("entertainment", "ENTERTAINMENT"),
    ("sports", "SPORTS"),
    ("science", "SCIENCE"),
    ("health", "HEALTH"),
];

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
}

#[derive(Debug)]
pub enum TopicError {
    Fetch(FetchError),
    Parse(String),
}

impl fmt::Display for TopicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "topic feed fetch failed: {}", e),
            Self::Parse(msg) => write!(f, "topic feed parse failed: {}", msg),
        }
    }
}

impl std::error::Error for TopicError {}

/// Map a friendly topic name (case-insensitive) to its feed section id.
pub fn section_for(topic: &str) -> Option<&'static str> {
    let wanted = topic.trim().to_lowercase();
    SECTIONS
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, section)| *section)
}

/// Parse an RSS document into topic items, skipping items without a title.
pub fn parse_feed(xml: &str) -> Result<Vec<TopicItem>, TopicError> {
    let rss: Rss = quick_xml::de::from_str(xml).map_err(|e| TopicError::Parse(e.to_string()))?;
    Ok(rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let title = item.title?.trim().to_string();
            let link = item.link.unwrap_or_default().trim().to_string();
            Some(TopicItem { title, summary: link })
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct TopicClient {
    fetcher: Fetcher,
    feed_base: String,
}

impl TopicClient {
    pub fn new(fetcher: Fetcher, feed_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            feed_base: feed_base.into(),
        }
    }

    /// List the current items of `topic`. An unknown topic lists nothing.
    #[instrument(level = "info", skip(self))]
    pub async fn list(&self, topic: &str) -> Result<Vec<TopicItem>, TopicError> {
        let Some(section) = section_for(topic) else {
            warn!("Unknown topic; returning an empty listing");
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/{}?hl=en-US&gl=US&ceid=US:en",
            self.feed_base.trim_end_matches('/'),
            section
        );
        let xml = self.fetcher.fetch(&url).await.map_err(TopicError::Fetch)?;
        let items = parse_feed(&xml)?;
        info!(count = items.len(), section, "Listed topic feed");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{Router, extract::Path, http::StatusCode, routing::get};
    use std::time::Duration;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>Technology - Latest - Google News</title>
    <link>https://news.google.com</link>
    <item>
      <title>Chip maker &amp; partner unveil roadmap - Example Wire</title>
      <link>https://news.google.com/rss/articles/abc</link>
      <pubDate>Fri, 16 Oct 2026 10:00:00 GMT</pubDate>
      <description>&lt;a href="x"&gt;x&lt;/a&gt;</description>
      <source url="https://wire.example.com">Example Wire</source>
    </item>
    <item>
      <title>Second story</title>
      <link>https://news.google.com/rss/articles/def</link>
    </item>
    <item>
      <link>https://news.google.com/rss/articles/untitled</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_section_for() {
        assert_eq!(section_for("Technology"), Some("TECHNOLOGY"));
        assert_eq!(section_for(" sports "), Some("SPORTS"));
        assert_eq!(section_for("Gardening"), None);
    }

    #[test]
    fn test_parse_feed() {
        let items = parse_feed(FEED).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Chip maker & partner unveil roadmap - Example Wire");
        assert_eq!(items[0].summary, "https://news.google.com/rss/articles/abc");
        assert_eq!(items[1].title, "Second story");
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        assert!(matches!(parse_feed("<html><body>nope"), Err(TopicError::Parse(_))));
    }

    #[tokio::test]
    async fn test_list_fetches_section_feed() {
        let app = Router::new().route(
            "/topic/{section}",
            get(|Path(section): Path<String>| async move {
                if section == "TECHNOLOGY" {
                    (StatusCode::OK, FEED.to_string())
                } else {
                    (StatusCode::NOT_FOUND, String::new())
                }
            }),
        );
        let base = serve(app).await;
        let fetcher = Fetcher::new("t", Duration::from_secs(2)).unwrap();
        let client = TopicClient::new(fetcher, format!("{}/topic/", base));

        let items = client.list(DEFAULT_TOPIC).await.unwrap();
        assert_eq!(items.len(), 2);

        assert!(client.list("Gardening").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_reports_fetch_failure() {
        let app = Router::new().route("/topic/{section}", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let base = serve(app).await;
        let fetcher = Fetcher::new("t", Duration::from_secs(2)).unwrap();
        let client = TopicClient::new(fetcher, format!("{}/topic", base));

        let err = client.list("World").await.unwrap_err();
        assert!(matches!(err, TopicError::Fetch(FetchError::Status(503))));
    }
}
