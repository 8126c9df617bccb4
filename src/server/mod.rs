//! HTTP surface.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | [`handlers::root`] |
//! | `GET /get_news_from_url?url=` | [`handlers::get_news_from_url`] |
//! | `GET /scrape-google-news?query=` | [`handlers::scrape_google_news`] |
//! | `GET /scrape-gnewsclient?topic=` | [`handlers::scrape_gnewsclient`] |

use crate::batch::BatchOrchestrator;
use crate::digest::ArticleDigester;
use crate::scrapers::topics::TopicClient;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod handlers;

/// Everything the handlers need, built once in `main`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub digester: ArticleDigester,
    pub batch: BatchOrchestrator,
    pub topics: TopicClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/get_news_from_url", get(handlers::get_news_from_url))
        .route("/scrape-google-news", get(handlers::scrape_google_news))
        .route("/scrape-gnewsclient", get(handlers::scrape_gnewsclient))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
