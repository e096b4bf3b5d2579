//! Error types for the CLI application.

use carbontrace_emissions::FactorTableError;
use carbontrace_extractor::ExtractorError;
use carbontrace_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider could not be constructed
    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// Extractor could not be constructed
    #[error("Extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    /// Factor table could not be loaded
    #[error("Factor table error: {0}")]
    Factors(#[from] FactorTableError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Activity log contains a line that is not a record
    #[error("Activity log is corrupt at line {line}: {reason}")]
    CorruptLog {
        /// 1-based line number
        line: usize,
        /// Parse error
        reason: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Record not found
    #[error("Activity not found: {0}")]
    NotFound(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// The pipeline reported a failure
    #[error("{0}")]
    Analysis(String),
}
