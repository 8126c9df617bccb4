//! # News Digest
//!
//! An HTTP service that turns news articles into short headline and summary
//! pairs using a hosted abstractive summarization model.
//!
//! ## Features
//!
//! - Single article: fetch a URL, extract its body text through a cascade of
//!   container heuristics, and generate a headline and a summary for it
//! - Search: scrape a Google News query and summarize up to five results
//!   concurrently, isolating each result's failures in its own entry
//! - Topics: list the current headlines of a Google News topic feed
//!
//! ## Usage
//!
//! ```sh
//! HUGGINGFACE_API_KEY=hf_xxx news_digest --bind 127.0.0.1:8000
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: one shared HTTP client with a browser `User-Agent`
//! 2. **Extraction**: container cascade, cleanup, character budget
//! 3. **Inference**: a bounded worker pool in front of the model client,
//!    with retries on transient failures
//! 4. **Serving**: axum routes that wrap the results in `{"news": ...}`

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod batch;
mod cli;
mod config;
mod digest;
mod fetcher;
mod headline;
mod inference;
mod models;
mod scrapers;
mod sentinels;
mod server;
mod summarizer;
mod text;

#[cfg(test)]
mod test_support;

use batch::BatchOrchestrator;
use cli::Cli;
use config::Settings;
use digest::ArticleDigester;
use fetcher::Fetcher;
use headline::HeadlineGenerator;
use inference::huggingface::HuggingFaceModel;
use inference::pool::InferencePool;
use inference::retry::RetryModel;
use scrapers::article::ContentExtractor;
use scrapers::topics::TopicClient;
use server::AppState;
use summarizer::Summarizer;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("news_digest starting up");

    let args = Cli::parse();
    debug!(bind = %args.bind, config = ?args.config, "Parsed CLI arguments");

    let settings = Settings::load(args.config.as_deref()).await?;

    if args.hf_api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
        warn!("No Hugging Face API key configured; model calls will report errors");
    }

    // ---- Model: client, retries, worker pool ----
    let model_client = reqwest::Client::builder()
        .timeout(settings.model_timeout())
        .build()?;
    let model = RetryModel::new(
        HuggingFaceModel::new(model_client, settings.model_url.clone(), args.hf_api_key.clone()),
        settings.max_retries,
        settings.retry_base_delay(),
    );
    let pool = InferencePool::new(Arc::new(model), settings.inference_workers, settings.model_call_deadline());
    info!(
        model_url = %settings.model_url,
        workers = pool.workers(),
        max_retries = settings.max_retries,
        "Inference pool ready"
    );

    // ---- Pipelines ----
    let fetcher = Fetcher::new(&settings.user_agent, settings.fetch_timeout())?;
    let summarizer = Summarizer::new(pool.clone());

    let state = AppState {
        digester: ArticleDigester::new(
            fetcher.clone(),
            Arc::new(ContentExtractor::default()),
            summarizer.clone(),
            HeadlineGenerator::new(pool),
            settings.max_chars,
        ),
        batch: BatchOrchestrator::new(
            fetcher.clone(),
            summarizer,
            settings.search_url.clone(),
            settings.fetch_concurrency,
            settings.batch_deadline(),
        ),
        topics: TopicClient::new(fetcher, settings.topic_feed_url.clone()),
    };

    // ---- Serve ----
    let listener = TcpListener::bind(args.bind.as_str()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received; draining connections");
}
