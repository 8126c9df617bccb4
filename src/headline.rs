//! Headline generation.
//!
//! Same model and pool as the summarizer, a different contract: a prompt
//! asking for an attention-grabbing title built around the story's most
//! significant point, and [`GenerationParams::HEADLINE`] (5 to 20 tokens).
//! Failures become [`HEADLINE_FAILED`].

use crate::inference::GenerationParams;
use crate::inference::pool::InferencePool;
use crate::sentinels::HEADLINE_FAILED;
use crate::summarizer::MAX_INPUT_CHARS;
use crate::text::{collapse_repeated_words, collapse_whitespace, truncate_chars};
use tracing::{error, info, instrument};

/// Wrap article text in the headline instruction.
pub fn headline_prompt(article: &str) -> String {
    format!(
        "Create a strong, attention-grabbing headline for the following news article. \
         Keep it short but convey the most exciting or significant part of the story. \
         Do not reuse the first line of the article; find its key point and build the title around it.\n\
         Here is the article: {}",
        article
    )
}

#[derive(Debug, Clone)]
pub struct HeadlineGenerator {
    pool: InferencePool,
}

impl HeadlineGenerator {
    pub fn new(pool: InferencePool) -> Self {
        Self { pool }
    }

    #[instrument(level = "info", skip_all, fields(input_chars = text.chars().count()))]
    pub async fn headline(&self, text: &str) -> String {
        let article = truncate_chars(collapse_whitespace(text).trim(), MAX_INPUT_CHARS);
        if article.is_empty() {
            error!("Nothing to write a headline for");
            return HEADLINE_FAILED.to_string();
        }

        match self
            .pool
            .generate(&headline_prompt(&article), GenerationParams::HEADLINE)
            .await
        {
            Ok(raw) => {
                let title = collapse_repeated_words(raw.trim());
                info!(title = %title, "Generated headline");
                title
            }
            Err(e) => {
                error!(error = %e, "Error generating headline");
                HEADLINE_FAILED.to_string()
            }
        }
    }
}
