//! CarbonTrace LLM Provider Layer
//!
//! Pluggable generative-AI providers for the activity extractor.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `carbontrace-domain`. Every provider accepts a prompt plus a JSON schema
//! and returns the raw completion text; schema validation happens in the
//! extractor regardless of what the provider enforces.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API with JSON-schema `format`
//! - `GeminiProvider`: Google Generative Language API with `responseJsonSchema`
//! - `Provider`: enum over the above, for config-driven selection
//!
//! # Examples
//!
//! ```
//! use carbontrace_domain::traits::LlmProvider;
//! use carbontrace_llm::MockProvider;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod mock;
pub mod ollama;
mod retry;

use carbontrace_domain::traits::LlmProvider;
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credentials missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Communication(_) | LlmError::RateLimitExceeded)
    }
}

/// Parse the output schema handed to `generate_structured`
pub(crate) fn parse_schema(schema: &str) -> Result<serde_json::Value, LlmError> {
    serde_json::from_str(schema).map_err(|e| LlmError::Other(format!("Invalid output schema: {}", e)))
}

/// Any of the supported providers, selected at runtime
#[derive(Debug, Clone)]
pub enum Provider {
    /// Canned responses
    Mock(MockProvider),
    /// Local Ollama instance
    Ollama(OllamaProvider),
    /// Google Gemini
    Gemini(GeminiProvider),
}

impl From<MockProvider> for Provider {
    fn from(provider: MockProvider) -> Self {
        Provider::Mock(provider)
    }
}

impl From<OllamaProvider> for Provider {
    fn from(provider: OllamaProvider) -> Self {
        Provider::Ollama(provider)
    }
}

impl From<GeminiProvider> for Provider {
    fn from(provider: GeminiProvider) -> Self {
        Provider::Gemini(provider)
    }
}

impl LlmProvider for Provider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        match self {
            Provider::Mock(p) => p.model_name(),
            Provider::Ollama(p) => p.model_name(),
            Provider::Gemini(p) => p.model_name(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Mock(p) => p.generate(prompt).await,
            Provider::Ollama(p) => p.generate(prompt).await,
            Provider::Gemini(p) => p.generate(prompt).await,
        }
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Mock(p) => p.generate_structured(prompt, schema).await,
            Provider::Ollama(p) => p.generate_structured(prompt, schema).await,
            Provider::Gemini(p) => p.generate_structured(prompt, schema).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(LlmError::Communication("reset".into()).is_transient());
        assert!(LlmError::RateLimitExceeded.is_transient());
        assert!(!LlmError::InvalidResponse("bad".into()).is_transient());
        assert!(!LlmError::Authentication("no key".into()).is_transient());
        assert!(!LlmError::ModelNotAvailable("x".into()).is_transient());
    }

    #[tokio::test]
    async fn test_provider_enum_delegates() {
        let provider: Provider = MockProvider::new("delegated").into();
        assert_eq!(provider.model_name(), "mock");
        assert_eq!(provider.generate("p").await.unwrap(), "delegated");
        assert_eq!(
            provider.generate_structured("p", "{}").await.unwrap(),
            "delegated"
        );
    }
}
