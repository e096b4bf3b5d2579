//! CarbonTrace Emissions Calculator
//!
//! Deterministic half of the pipeline: turns a
//! [`StructuredActivity`](carbontrace_domain::StructuredActivity) into kg CO₂e
//! using a fixed emission-factor table.
//!
//! The calculator provides:
//! - Exact item lookup against the factor table (with an optional alias map)
//! - Unit normalization within a dimension (g/kg, km/mile)
//! - Rounding to 3 decimal places
//!
//! Unknown items and unconvertible units are reported as outcomes with a
//! zero value, never as errors.
//!
//! # Examples
//!
//! ```
//! use carbontrace_domain::{ActivityCategory, StructuredActivity, Unit};
//! use carbontrace_emissions::EmissionsCalculator;
//!
//! let calculator = EmissionsCalculator::default();
//! let lunch = StructuredActivity::new(
//!     ActivityCategory::FoodConsumption,
//!     "Lunch with chicken",
//!     "chicken",
//!     200.0,
//!     Unit::G,
//! );
//!
//! assert_eq!(calculator.co2e(&lunch), 1.38);
//! ```

#![warn(missing_docs)]

mod calculator;
mod error;
mod factors;
mod units;

pub use calculator::{round3, Calculation, CalculationOutcome, EmissionsCalculator};
pub use error::FactorTableError;
pub use factors::FactorTable;
pub use units::{convert, G_PER_KG, KM_PER_MILE};
