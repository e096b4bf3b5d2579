//! Error types for the Analyzer

use carbontrace_extractor::ExtractorError;
use thiserror::Error;

/// Errors that can occur while analyzing a description
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The description itself was rejected (empty, too short or too long)
    #[error("{0}")]
    InvalidInput(String),

    /// The AI extraction step failed
    #[error("Extraction failed: {0}")]
    Extraction(#[source] ExtractorError),
}

impl From<ExtractorError> for AnalyzeError {
    fn from(e: ExtractorError) -> Self {
        if e.is_input_error() {
            AnalyzeError::InvalidInput(e.to_string())
        } else {
            AnalyzeError::Extraction(e)
        }
    }
}
