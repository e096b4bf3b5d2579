//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Description is empty or whitespace
    #[error("Activity description is empty")]
    EmptyInput,

    /// Description is shorter than the configured minimum
    #[error("Text too short: {0} chars (min: {1})")]
    TextTooShort(usize, usize),

    /// Description exceeds the configured maximum
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Extraction timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Completion did not satisfy the output schema
    #[error("Invalid activity format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Whether the error was caused by the caller's input rather than the provider
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ExtractorError::EmptyInput
                | ExtractorError::TextTooShort(_, _)
                | ExtractorError::TextTooLong(_, _)
        )
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
