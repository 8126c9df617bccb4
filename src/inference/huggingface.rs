//! Hugging Face hosted Inference API client.
//!
//! Posts `{"inputs", "parameters", "options"}` to a summarization model
//! endpoint and reads back `[{"summary_text": ...}]`. Text2text models answer
//! with `generated_text` instead, which is accepted too.

use super::{GenerationParams, ModelError, SummarizationModel};
use crate::text::preview;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, instrument, warn};

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParams,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

#[derive(Deserialize)]
struct InferenceOutput {
    #[serde(alias = "generated_text")]
    summary_text: String,
}

pub struct HuggingFaceModel {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HuggingFaceModel {
    /// A missing or empty `api_key` is not rejected here: the host answers
    /// 401 and the call fails like any other model failure.
    pub fn new(client: Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl SummarizationModel for HuggingFaceModel {
    fn name(&self) -> &str {
        &self.url
    }

    #[instrument(level = "debug", skip_all, fields(url = %self.url, input_chars = input.chars().count()))]
    async fn generate(&self, input: &str, params: GenerationParams) -> Result<String, ModelError> {
        let t0 = Instant::now();
        let payload = InferenceRequest {
            inputs: input,
            parameters: params,
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: true,
            },
        };

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| if e.is_timeout() { ModelError::Timeout } else { ModelError::Http(e.to_string()) })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ModelError::Http(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %preview(&body, 200), "Inference API error");
            return Err(ModelError::Status {
                status: status.as_u16(),
                message: preview(&body, 200),
            });
        }

        let outputs: Vec<InferenceOutput> = serde_json::from_str(&body)
            .map_err(|e| ModelError::Malformed(format!("{} in {}", e, preview(&body, 200))))?;

        let text = outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ModelError::Empty)?;

        debug!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            output_chars = text.chars().count(),
            "Inference API call succeeded"
        );
        Ok(text)
    }
}
