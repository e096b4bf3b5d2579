//! CarbonTrace Analyzer
//!
//! Orchestrates the activity-to-emissions pipeline:
//!
//! ```text
//! description → Extractor → StructuredActivity → EmissionsCalculator → AnalyzedActivity
//! ```
//!
//! [`Analyzer::analyze`] never fails; it folds every outcome into the
//! `{"success": true, "data": ...}` / `{"success": false, "error": ...}`
//! envelope returned to callers. [`FootprintSummary`] aggregates logged
//! [`ActivityRecord`](carbontrace_domain::ActivityRecord)s.
//!
//! # Example
//!
//! ```no_run
//! use carbontrace_analyzer::Analyzer;
//! use carbontrace_emissions::FactorTable;
//! use carbontrace_extractor::ExtractorConfig;
//! use carbontrace_llm::OllamaProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::from_provider(
//!     OllamaProvider::default_endpoint("llama3.1"),
//!     ExtractorConfig::default(),
//!     FactorTable::builtin(),
//! )?;
//!
//! let response = analyzer.analyze("I drove 15km to work in my petrol car").await;
//! println!("{}", serde_json::to_string(&response)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod error;
mod summary;

pub use analyzer::{AnalysisResponse, Analyzer, ANALYSIS_FAILED_MESSAGE};
pub use error::AnalyzeError;
pub use summary::{CategoryTotal, FootprintSummary, SECONDS_PER_DAY};
