//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Implementations live in other crates.

use crate::StructuredActivity;
use std::future::Future;

/// Trait for generative-AI provider operations
///
/// Implemented by the infrastructure layer (carbontrace-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Name of the model answering requests, for diagnostics
    fn model_name(&self) -> &str;

    /// Generate a free-text completion
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Generate a completion constrained to a JSON schema
    ///
    /// `schema` is a serialized JSON Schema document. Providers that cannot
    /// enforce it server-side still return the raw completion; callers
    /// validate locally either way.
    fn generate_structured(
        &self,
        prompt: &str,
        schema: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for turning a free-text description into a structured activity
///
/// Implemented by the application layer (carbontrace-extractor)
pub trait ActivityExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract exactly one structured activity, or fail
    fn extract(
        &self,
        description: &str,
    ) -> impl Future<Output = Result<StructuredActivity, Self::Error>> + Send;
}
