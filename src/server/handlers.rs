use super::AppState;
use crate::models::{DetailEnvelope, ErrorEnvelope, NewsEnvelope};
use crate::scrapers::topics::DEFAULT_TOPIC;
use crate::sentinels::{NEWS_FETCH_FAILED, NO_ARTICLE_FOUND};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct UrlParams {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicParams {
    #[serde(default = "default_topic")]
    pub topic: String,
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "GET /get_news_from_url?url=, /scrape-google-news?query=, /scrape-gnewsclient?topic="
    }))
}

/// Headline and summary of one article.
pub async fn get_news_from_url(State(state): State<Arc<AppState>>, Query(params): Query<UrlParams>) -> Response {
    // Links pasted from elsewhere often carry a stray line break.
    let url = params.url.trim_matches(['\n', '\r']);

    match state.digester.digest(url).await {
        Some(result) => Json(NewsEnvelope { news: result }).into_response(),
        None => {
            info!(url, "Nothing extracted; answering 404");
            (
                StatusCode::NOT_FOUND,
                Json(DetailEnvelope {
                    detail: NO_ARTICLE_FOUND.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Up to five summarized search results for a query.
pub async fn scrape_google_news(State(state): State<Arc<AppState>>, Query(params): Query<SearchParams>) -> Response {
    match state.batch.batch_summarize(&params.query).await {
        Ok(results) => Json(NewsEnvelope { news: results }).into_response(),
        Err(e) => {
            warn!(error = %e, "Search failed");
            news_fetch_failed()
        }
    }
}

/// Current headlines of a topic feed, each with its link in `summary`.
pub async fn scrape_gnewsclient(State(state): State<Arc<AppState>>, Query(params): Query<TopicParams>) -> Response {
    match state.topics.list(&params.topic).await {
        Ok(items) => Json(NewsEnvelope { news: items }).into_response(),
        Err(e) => {
            warn!(error = %e, topic = %params.topic, "Topic listing failed");
            news_fetch_failed()
        }
    }
}

fn news_fetch_failed() -> Response {
    Json(ErrorEnvelope {
        error: NEWS_FETCH_FAILED.to_string(),
    })
    .into_response()
}
