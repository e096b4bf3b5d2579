//! Emission factor module - static reference data

use crate::Unit;
use serde::{Deserialize, Serialize};

/// CO₂e emitted per one `unit` of an item
///
/// `name` is the lowercase keyword matched exactly against
/// [`StructuredActivity::item_name`](crate::StructuredActivity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Unique key, not used for lookup
    pub id: String,

    /// Lowercase join key
    pub name: String,

    /// kg CO₂e per one `unit`, non-negative
    pub value: f64,

    /// Unit the value is expressed per
    pub unit: Unit,

    /// Human-readable description
    pub description: String,
}

impl EmissionFactor {
    /// Create a new emission factor
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        unit: Unit,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            unit,
            description: description.into(),
        }
    }
}
