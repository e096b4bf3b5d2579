//! CarbonTrace Domain Layer
//!
//! This crate contains the value types shared by every other CarbonTrace
//! crate and the trait seams between the pipeline and its collaborators.
//! It carries no I/O and only two external dependencies (`uuid` for record
//! identifiers, `serde` for the shapes that cross the persistence boundary).
//!
//! ## Key Concepts
//!
//! - **StructuredActivity**: what the AI extraction step produces from a
//!   free-text description (category, item keyword, quantity, unit)
//! - **EmissionFactor**: kg CO₂e per one unit of an item, the static
//!   reference data the calculator joins against
//! - **AnalyzedActivity**: a structured activity plus its CO₂e value, the
//!   only artifact handed to persistence
//! - **ActivityRecord**: the persisted form, with caller metadata and a
//!   `Pending → Committed` status
//!
//! ## Pipeline
//!
//! ```text
//! description → ActivityExtractor → StructuredActivity → calculator → AnalyzedActivity
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activity;
pub mod factor;
pub mod record;
pub mod traits;
pub mod unit;

// Re-exports for convenience
pub use activity::{ActivityCategory, AnalyzedActivity, StructuredActivity};
pub use factor::EmissionFactor;
pub use record::{ActivityId, ActivityRecord, CommitStatus};
pub use unit::{Dimension, Unit};
