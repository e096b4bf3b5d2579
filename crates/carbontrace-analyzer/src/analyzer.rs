//! Pipeline orchestration

use crate::error::AnalyzeError;
use carbontrace_domain::traits::{ActivityExtractor, LlmProvider};
use carbontrace_domain::AnalyzedActivity;
use carbontrace_emissions::{EmissionsCalculator, FactorTable};
use carbontrace_extractor::{Extractor, ExtractorConfig, ExtractorError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Message returned for any failure past input validation
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze activity. The AI model may be temporarily unavailable.";

/// Caller-facing result envelope
///
/// Serializes as `{"success":true,"data":{...}}` or
/// `{"success":false,"error":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Whether `data` is present
    pub success: bool,

    /// The analyzed activity, on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalyzedActivity>,

    /// Human-readable reason, on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Successful response
    pub fn ok(data: AnalyzedActivity) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed response
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Convert into a `Result`, for callers that prefer `?`
    pub fn into_result(self) -> Result<AnalyzedActivity, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self
                .error
                .unwrap_or_else(|| ANALYSIS_FAILED_MESSAGE.to_string())),
        }
    }
}

/// Runs extraction and calculation for one description at a time
pub struct Analyzer<E> {
    extractor: E,
    calculator: EmissionsCalculator,
}

impl<E> Analyzer<E>
where
    E: ActivityExtractor<Error = ExtractorError>,
{
    /// Create an analyzer from an extractor and a calculator
    pub fn new(extractor: E, calculator: EmissionsCalculator) -> Self {
        Self {
            extractor,
            calculator,
        }
    }

    /// The calculator in use
    pub fn calculator(&self) -> &EmissionsCalculator {
        &self.calculator
    }

    /// Analyze a description, returning a typed error on failure
    pub async fn try_analyze(&self, description: &str) -> Result<AnalyzedActivity, AnalyzeError> {
        let activity = self.extractor.extract(description).await?;
        let analyzed = self.calculator.analyze(activity);

        info!(
            category = %analyzed.activity.category,
            item = %analyzed.activity.item_name,
            co2e = analyzed.co2e,
            "Analyzed activity"
        );

        Ok(analyzed)
    }

    /// Analyze a description; never fails
    ///
    /// Input errors are reported with their own message. Every other failure
    /// is logged and reported as [`ANALYSIS_FAILED_MESSAGE`].
    pub async fn analyze(&self, description: &str) -> AnalysisResponse {
        match self.try_analyze(description).await {
            Ok(analyzed) => AnalysisResponse::ok(analyzed),
            Err(AnalyzeError::InvalidInput(message)) => {
                warn!("Rejected activity description: {}", message);
                AnalysisResponse::failure(message)
            }
            Err(e) => {
                error!("Error analyzing activity: {}", e);
                AnalysisResponse::failure(ANALYSIS_FAILED_MESSAGE)
            }
        }
    }
}

impl<L> Analyzer<Extractor<L>>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    /// Wire an analyzer around a provider and a factor table
    ///
    /// The table's item names are offered to the model as known keywords.
    pub fn from_provider(
        provider: L,
        config: ExtractorConfig,
        table: Arc<FactorTable>,
    ) -> Result<Self, ExtractorError> {
        let extractor = Extractor::new(provider, config)?
            .with_known_items(table.names().map(str::to_string).collect::<Vec<_>>());
        Ok(Self::new(extractor, EmissionsCalculator::new(table)))
    }
}
