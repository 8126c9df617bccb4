//! Summarization model access.
//!
//! The model is a black box behind [`SummarizationModel`]: text in, generated
//! text out, under explicit [`GenerationParams`]. The pieces stack up as
//! decorators around one process-wide client:
//!
//! - [`huggingface::HuggingFaceModel`]: Hosted Inference API client
//! - [`retry::RetryModel`]: Exponential backoff on transient failures
//! - [`pool::InferencePool`]: Bounded worker slots every caller goes through
//!
//! # Length contract
//!
//! Lengths are expressed in the model's own token units, not characters or
//! words. Decoding is greedy (`do_sample = false`), so the same input and
//! parameters always produce the same output.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

pub mod huggingface;
pub mod pool;
pub mod retry;

/// Output length bounds and decoding mode for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationParams {
    /// Minimum output length in model tokens.
    pub min_length: u32,
    /// Maximum output length in model tokens.
    pub max_length: u32,
    /// Always `false`: sampling would break determinism.
    pub do_sample: bool,
}

impl GenerationParams {
    /// Article summaries: 30 to 100 tokens.
    pub const SUMMARY: Self = Self {
        min_length: 30,
        max_length: 100,
        do_sample: false,
    };

    /// Headlines: 5 to 20 tokens.
    pub const HEADLINE: Self = Self {
        min_length: 5,
        max_length: 20,
        do_sample: false,
    };
}

/// Failure of a single model invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The request never got a response (connect, DNS, TLS, body read).
    Http(String),
    /// The host answered with a non-2xx status.
    Status { status: u16, message: String },
    /// The response body did not have the expected shape.
    Malformed(String),
    /// The model answered with no text.
    Empty,
    /// The call exceeded the per-invocation deadline.
    Timeout,
    /// The worker running the call died or the pool was shut down.
    Worker(String),
}

impl ModelError {
    /// Whether retrying the same call could succeed.
    ///
    /// Rate limiting (429), server errors and the 503 a hosted model returns
    /// while it is loading are transient; authentication and request errors
    /// are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Malformed(_) | Self::Empty | Self::Worker(_) => false,
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(msg) => write!(f, "model request failed: {}", msg),
            Self::Status { status, message } => write!(f, "model host returned {}: {}", status, message),
            Self::Malformed(msg) => write!(f, "malformed model response: {}", msg),
            Self::Empty => write!(f, "model returned no text"),
            Self::Timeout => write!(f, "model call timed out"),
            Self::Worker(msg) => write!(f, "inference worker failed: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

/// A text-to-text generation model.
#[async_trait]
pub trait SummarizationModel: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Generate text for `input` under `params`.
    async fn generate(&self, input: &str, params: GenerationParams) -> Result<String, ModelError>;
}
