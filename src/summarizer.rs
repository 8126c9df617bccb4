//! Article summarization.
//!
//! [`Summarizer`] drives the shared model under [`GenerationParams::SUMMARY`]
//! (30 to 100 model tokens, greedy decoding) and cleans up the output.
//! Greedy decoding occasionally emits the same word twice in a row; those
//! repeats are collapsed before the summary is returned.
//!
//! Failures never escape: any error becomes [`SUMMARY_FAILED`].

use crate::inference::GenerationParams;
use crate::inference::pool::InferencePool;
use crate::sentinels::SUMMARY_FAILED;
use crate::text::{collapse_repeated_words, collapse_whitespace, truncate_chars};
use std::time::Instant;
use tracing::{error, info, instrument};

/// Longest input handed to the model, in characters.
pub const MAX_INPUT_CHARS: usize = 3000;

#[derive(Debug, Clone)]
pub struct Summarizer {
    pool: InferencePool,
}

impl Summarizer {
    pub fn new(pool: InferencePool) -> Self {
        Self { pool }
    }

    /// Summarize `text`.
    ///
    /// # Returns
    ///
    /// The cleaned summary, or [`SUMMARY_FAILED`] when the text is blank or
    /// the model call fails.
    #[instrument(level = "info", skip_all, fields(input_chars = text.chars().count()))]
    pub async fn summarize(&self, text: &str) -> String {
        let input = truncate_chars(collapse_whitespace(text).trim(), MAX_INPUT_CHARS);
        if input.is_empty() {
            error!("Nothing to summarize");
            return SUMMARY_FAILED.to_string();
        }

        let t0 = Instant::now();
        match self.pool.generate(&input, GenerationParams::SUMMARY).await {
            Ok(raw) => {
                let summary = collapse_repeated_words(raw.trim());
                info!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    summary_chars = summary.chars().count(),
                    "Summarized text"
                );
                summary
            }
            Err(e) => {
                error!(error = %e, elapsed_ms = t0.elapsed().as_millis() as u64, "Error summarizing text");
                SUMMARY_FAILED.to_string()
            }
        }
    }
}
