//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API.
//!
//! # Features
//!
//! - Async HTTP communication with Ollama API
//! - Structured output through the `format` field (JSON schema)
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use carbontrace_domain::traits::LlmProvider;
//! use carbontrace_llm::OllamaProvider;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1");
//! let answer = provider.generate("Say hello").await;
//! # }
//! ```

use crate::retry::with_retries;
use crate::{parse_schema, LlmError};
use carbontrace_domain::traits::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model
pub const DEFAULT_MODEL: &str = "llama3.1";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local LLM inference
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.1", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a new Ollama provider against `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, request: &OllamaGenerateRequest<'_>) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<OllamaGenerateResponse>()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            return Ok(body.response);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)))
    }

    async fn complete(&self, prompt: &str, format: Option<serde_json::Value>) -> Result<String, LlmError> {
        let request = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format,
            options: OllamaOptions { temperature: 0.0 },
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Calling Ollama");
        with_retries(self.max_retries, || self.send_once(&request)).await
    }
}

impl LlmProvider for OllamaProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt, None).await
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        let format = parse_schema(schema)?;
        self.complete(prompt, Some(format)).await
    }
}
