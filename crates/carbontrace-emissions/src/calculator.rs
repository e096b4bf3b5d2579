//! CO₂e calculation

use crate::factors::FactorTable;
use crate::units::convert;
use carbontrace_domain::{AnalyzedActivity, StructuredActivity, Unit};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of pricing one activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    /// kg CO₂e, rounded to 3 decimals; 0 unless `outcome` is `Computed`
    pub co2e: f64,

    /// How the value was obtained
    pub outcome: CalculationOutcome,
}

/// How a [`Calculation`] was obtained
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationOutcome {
    /// A factor applied
    Computed {
        /// Id of the factor used
        factor_id: String,
        /// Quantity expressed in the factor's unit
        normalized_quantity: f64,
    },

    /// No factor matches the item name
    UnknownItem,

    /// The activity's unit cannot be converted into the factor's unit
    IncompatibleUnit {
        /// Unit of the activity
        from: Unit,
        /// Unit of the factor
        to: Unit,
    },

    /// The quantity is too large for the result to be represented
    OutOfRange {
        /// Quantity of the activity, in its own unit
        quantity: f64,
    },
}

impl Calculation {
    fn zero(outcome: CalculationOutcome) -> Self {
        Self { co2e: 0.0, outcome }
    }

    /// Whether a factor was applied
    pub fn is_computed(&self) -> bool {
        matches!(self.outcome, CalculationOutcome::Computed { .. })
    }
}

/// Prices structured activities against a factor table
///
/// Pure apart from logging: the same activity and table always give the same
/// result, and no input makes it fail.
#[derive(Debug, Clone)]
pub struct EmissionsCalculator {
    table: Arc<FactorTable>,
}

impl EmissionsCalculator {
    /// Create a calculator over the given table
    pub fn new(table: Arc<FactorTable>) -> Self {
        Self { table }
    }

    /// The table in use
    pub fn table(&self) -> &FactorTable {
        &self.table
    }

    /// Price an activity, reporting how the value was obtained
    pub fn calculate(&self, activity: &StructuredActivity) -> Calculation {
        let Some(factor) = self.table.lookup(&activity.item_name) else {
            warn!(
                item = %activity.item_name,
                "No emission factor for item, reporting 0"
            );
            return Calculation::zero(CalculationOutcome::UnknownItem);
        };

        let Some(normalized) = convert(activity.quantity, activity.unit, factor.unit) else {
            warn!(
                item = %activity.item_name,
                from = %activity.unit,
                to = %factor.unit,
                "Cannot convert quantity into factor unit, reporting 0"
            );
            return Calculation::zero(CalculationOutcome::IncompatibleUnit {
                from: activity.unit,
                to: factor.unit,
            });
        };

        let co2e = round3(normalized * factor.value);
        if !co2e.is_finite() {
            warn!(
                item = %activity.item_name,
                quantity = activity.quantity,
                "Emissions overflow for quantity, reporting 0"
            );
            return Calculation::zero(CalculationOutcome::OutOfRange {
                quantity: activity.quantity,
            });
        }

        debug!(
            factor = %factor.id,
            normalized_quantity = normalized,
            co2e,
            "Calculated emissions"
        );

        Calculation {
            co2e,
            outcome: CalculationOutcome::Computed {
                factor_id: factor.id.clone(),
                normalized_quantity: normalized,
            },
        }
    }

    /// kg CO₂e for an activity
    pub fn co2e(&self, activity: &StructuredActivity) -> f64 {
        self.calculate(activity).co2e
    }

    /// Attach the CO₂e value to an activity
    pub fn analyze(&self, activity: StructuredActivity) -> AnalyzedActivity {
        let co2e = self.co2e(&activity);
        AnalyzedActivity::new(activity, co2e)
    }
}

impl Default for EmissionsCalculator {
    fn default() -> Self {
        Self::new(FactorTable::builtin())
    }
}

/// Round to 3 decimal places, halves away from zero
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
