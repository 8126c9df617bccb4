//! Shared fixtures for unit tests: a throwaway HTTP server and stub models.

use crate::inference::pool::InferencePool;
use crate::inference::{GenerationParams, ModelError, SummarizationModel};
use async_trait::async_trait;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Wrap a model in a two-worker pool.
pub fn pool_of(model: impl SummarizationModel + 'static) -> InferencePool {
    InferencePool::new(Arc::new(model), 2, Duration::from_secs(5))
}

/// Returns the first `max_length` words of its input.
#[derive(Debug)]
pub struct EchoModel;

#[async_trait]
impl SummarizationModel for EchoModel {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate(&self, input: &str, params: GenerationParams) -> Result<String, ModelError> {
        let words: Vec<&str> = input
            .split_whitespace()
            .take(params.max_length as usize)
            .collect();
        Ok(words.join(" "))
    }
}

/// Always returns the same text.
#[derive(Debug)]
pub struct ScriptedModel(pub String);

impl ScriptedModel {
    pub fn new(text: &str) -> Self {
        Self(text.to_string())
    }
}

#[async_trait]
impl SummarizationModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _input: &str, _params: GenerationParams) -> Result<String, ModelError> {
        Ok(self.0.clone())
    }
}

/// Reports how many characters it was sent.
#[derive(Debug)]
pub struct LengthModel;

#[async_trait]
impl SummarizationModel for LengthModel {
    fn name(&self) -> &str {
        "length"
    }

    async fn generate(&self, input: &str, _params: GenerationParams) -> Result<String, ModelError> {
        Ok(format!("received {} chars", input.chars().count()))
    }
}

/// Always fails with a non-transient error.
#[derive(Debug)]
pub struct FailingModel;

#[async_trait]
impl SummarizationModel for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _input: &str, _params: GenerationParams) -> Result<String, ModelError> {
        Err(ModelError::Status {
            status: 401,
            message: "Invalid credentials in Authorization header".to_string(),
        })
    }
}

/// Fails whenever the input contains `needle`, echoes otherwise.
#[derive(Debug)]
pub struct FailOnModel(pub &'static str);

#[async_trait]
impl SummarizationModel for FailOnModel {
    fn name(&self) -> &str {
        "fail-on"
    }

    async fn generate(&self, input: &str, params: GenerationParams) -> Result<String, ModelError> {
        if input.contains(self.0) {
            Err(ModelError::Empty)
        } else {
            EchoModel.generate(input, params).await
        }
    }
}
