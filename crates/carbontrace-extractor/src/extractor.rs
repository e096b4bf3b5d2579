//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::types::output_schema;
use carbontrace_domain::traits::{ActivityExtractor, LlmProvider};
use carbontrace_domain::StructuredActivity;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info};

/// The Extractor converts a free-text description into one structured activity
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
    schema: String,
    known_items: Vec<String>,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    /// Create a new Extractor
    ///
    /// Fails if the configuration is invalid.
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::from_shared(Arc::new(llm_provider), config)
    }

    /// Create a new Extractor around a provider that is shared elsewhere
    pub fn from_shared(
        llm_provider: Arc<L>,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let schema = output_schema()?;

        Ok(Self {
            llm_provider,
            config,
            schema,
            known_items: Vec::new(),
        })
    }

    /// Item keywords to suggest in the prompt, truncated to `known_items_limit`
    pub fn with_known_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_items = items
            .into_iter()
            .take(self.config.known_items_limit)
            .map(Into::into)
            .collect();
        self
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The serialized output schema sent with every request
    pub fn schema(&self) -> &str {
        &self.schema
    }

    fn check_length(&self, description: &str) -> Result<(), ExtractorError> {
        let len = description.chars().count();
        if len == 0 {
            return Err(ExtractorError::EmptyInput);
        }
        if len < self.config.min_text_length {
            return Err(ExtractorError::TextTooShort(len, self.config.min_text_length));
        }
        if len > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(len, self.config.max_text_length));
        }
        Ok(())
    }

    /// Call the LLM provider with the output schema attached
    async fn call_llm(&self, prompt: &str) -> Result<String, ExtractorError> {
        self.llm_provider
            .generate_structured(prompt, &self.schema)
            .await
            .map_err(|e| ExtractorError::Llm(e.to_string()))
    }
}

impl<L> ActivityExtractor for Extractor<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    type Error = ExtractorError;

    async fn extract(&self, description: &str) -> Result<StructuredActivity, ExtractorError> {
        let description = description.trim();
        self.check_length(description)?;

        let start = Instant::now();

        let prompt = PromptBuilder::new(description)
            .with_known_items(self.known_items.clone())
            .build();

        debug!("Prompt length: {} chars", prompt.len());

        let llm_response = timeout(self.config.extraction_timeout(), self.call_llm(&prompt))
            .await
            .map_err(|_| ExtractorError::Timeout)??;

        debug!("LLM response length: {} chars", llm_response.len());

        let activity = parse_llm_response(&llm_response)?;

        info!(
            model = self.llm_provider.model_name(),
            category = %activity.category,
            item = %activity.item_name,
            quantity = activity.quantity,
            unit = %activity.unit,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Extracted activity"
        );

        Ok(activity)
    }
}
