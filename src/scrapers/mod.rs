//! Markup parsers for the pages the service reads.
//!
//! # Submodules
//!
//! | Module | Input | Output |
//! |--------|-------|--------|
//! | [`article`] | Any article page | Cleaned, bounded body text |
//! | [`google_news`] | Google news search results | [`SearchCandidate`](crate::models::SearchCandidate) list |
//! | [`topics`] | Google News topic RSS feed | [`TopicItem`](crate::models::TopicItem) list |
//!
//! Parsing is synchronous and never awaits; the parsed document is dropped
//! before the caller's next suspension point.

pub mod article;
pub mod google_news;
pub mod topics;
