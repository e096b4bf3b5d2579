//! Gemini Provider Implementation
//!
//! Calls the Google Generative Language API (`generateContent`). Structured
//! requests set `responseMimeType` to `application/json` and pass the schema
//! as `responseJsonSchema`, so the model is constrained server-side.

use crate::retry::with_retries;
use crate::{parse_schema, LlmError};
use carbontrace_domain::traits::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default timeout for requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Google Gemini provider
#[derive(Clone)]
pub struct GeminiProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_json_schema: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Result<String, LlmError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Response contained no candidate text".to_string(),
            ));
        }
        Ok(text)
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Read the API key from an environment variable
    pub fn from_env(model: impl Into<String>, api_key_env: &str) -> Result<Self, LlmError> {
        let api_key = std::env::var(api_key_env)
            .map_err(|_| LlmError::Authentication(format!("{} is not set", api_key_env)))?;
        Ok(Self::new(model, api_key))
    }

    /// Point at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn send_once(&self, request: &GenerateContentRequest<'_>) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<GenerateContentResponse>()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            return body.into_text();
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Err(LlmError::Authentication(format!("HTTP {}", status)))
            }
            reqwest::StatusCode::NOT_FOUND => Err(LlmError::ModelNotAvailable(self.model.clone())),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(LlmError::RateLimitExceeded),
            s if s.is_server_error() => Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            ))),
            _ => Err(LlmError::Other(format!("HTTP {}: {}", status, error_text))),
        }
    }

    async fn complete(&self, prompt: &str, schema: Option<serde_json::Value>) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: schema.as_ref().map(|_| "application/json"),
                response_json_schema: schema,
            },
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Calling Gemini");
        with_retries(self.max_retries, || self.send_once(&request)).await
    }
}

impl LlmProvider for GeminiProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt, None).await
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        let schema = parse_schema(schema)?;
        self.complete(prompt, Some(schema)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let provider = GeminiProvider::new(DEFAULT_MODEL, "secret-key");
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = GeminiProvider::from_env(DEFAULT_MODEL, "CARBONTRACE_TEST_UNSET_GEMINI_KEY");
        assert!(matches!(result, Err(LlmError::Authentication(_))));
    }

    #[test]
    fn test_structured_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: Some("application/json"),
                response_json_schema: Some(serde_json::json!({"type": "object"})),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseJsonSchema"]["type"], "object");
    }

    #[test]
    fn test_response_text_extraction() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            response.into_text(),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_schema_rejected() {
        let provider = GeminiProvider::new(DEFAULT_MODEL, "key");
        let result = provider.generate_structured("prompt", "not json").await;
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let provider = GeminiProvider::new(DEFAULT_MODEL, "key")
            .with_base_url("http://127.0.0.1:9")
            .with_max_retries(1);
        let result = provider.generate("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
