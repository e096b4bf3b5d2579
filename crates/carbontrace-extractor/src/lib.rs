//! CarbonTrace Extractor
//!
//! Converts a natural-language activity description into a
//! [`StructuredActivity`](carbontrace_domain::StructuredActivity) using a
//! schema-constrained LLM call.
//!
//! # Architecture
//!
//! ```text
//! description → PromptBuilder → LLM (JSON schema) → parser/validator → StructuredActivity
//! ```
//!
//! # Key Features
//!
//! - **Schema-constrained output**: the JSON schema sent to the provider is
//!   derived from the response type, with `category` and `unit` restricted
//!   to their enumerations
//! - **Local validation**: the completion is validated again here, whatever
//!   the provider claims to enforce
//! - **Unit canonicalization**: common spellings ("miles", "kWh", "grams")
//!   are mapped onto the canonical units; anything else is rejected
//! - **All-or-nothing**: a description yields exactly one activity or an error
//!
//! # Example Usage
//!
//! ```no_run
//! use carbontrace_extractor::{ActivityExtractor, Extractor, ExtractorConfig};
//! use carbontrace_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{
//!     "category": "transportation",
//!     "activityName": "Drive to work",
//!     "itemName": "petrol car",
//!     "quantity": 15,
//!     "unit": "km"
//! }"#);
//! let extractor = Extractor::new(llm, ExtractorConfig::default())?;
//!
//! let activity = extractor.extract("I drove 15km to work in my petrol car").await?;
//! assert_eq!(activity.item_name, "petrol car");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use carbontrace_domain::traits::ActivityExtractor;
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_llm_response;
pub use prompt::PromptBuilder;
pub use types::{canonical_unit, output_schema};
