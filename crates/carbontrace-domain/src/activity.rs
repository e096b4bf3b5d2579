//! Activity module - structured and analyzed activities

use crate::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary category of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    /// Cars, buses, trains, flights
    Transportation,
    /// Household or office electricity
    ElectricityUsage,
    /// Meals and ingredients
    FoodConsumption,
    /// Clothing and other purchases
    ShoppingLifestyle,
    /// Anything that does not fit the main categories
    Other,
}

impl ActivityCategory {
    /// Every category, in schema order
    pub const ALL: [ActivityCategory; 5] = [
        ActivityCategory::Transportation,
        ActivityCategory::ElectricityUsage,
        ActivityCategory::FoodConsumption,
        ActivityCategory::ShoppingLifestyle,
        ActivityCategory::Other,
    ];

    /// Get the category name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Transportation => "transportation",
            ActivityCategory::ElectricityUsage => "electricity_usage",
            ActivityCategory::FoodConsumption => "food_consumption",
            ActivityCategory::ShoppingLifestyle => "shopping_lifestyle",
            ActivityCategory::Other => "other",
        }
    }

    /// Human-readable label ("Electricity Usage")
    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::Transportation => "Transportation",
            ActivityCategory::ElectricityUsage => "Electricity Usage",
            ActivityCategory::FoodConsumption => "Food Consumption",
            ActivityCategory::ShoppingLifestyle => "Shopping & Lifestyle",
            ActivityCategory::Other => "Other",
        }
    }

    /// Parse a category from its wire name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == lower)
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

/// An activity as structured by the extraction step
///
/// `item_name` is always lowercase and is the join key into the emission
/// factor table. `quantity` is always expressed in `unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredActivity {
    /// Primary category
    pub category: ActivityCategory,

    /// Short human-readable label, e.g. "Drive to work"
    pub activity_name: String,

    /// Lowercase keyword used for factor lookup, e.g. "petrol car"
    pub item_name: String,

    /// Non-negative magnitude in `unit`
    pub quantity: f64,

    /// Canonical unit of `quantity`
    pub unit: Unit,

    /// Diagnostic explanation from the extractor, never used downstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl StructuredActivity {
    /// Create a structured activity without reasoning
    ///
    /// The item name is lowercased so the lookup invariant holds even for
    /// hand-built values.
    pub fn new(
        category: ActivityCategory,
        activity_name: impl Into<String>,
        item_name: impl Into<String>,
        quantity: f64,
        unit: Unit,
    ) -> Self {
        Self {
            category,
            activity_name: activity_name.into(),
            item_name: item_name.into().to_lowercase(),
            quantity,
            unit,
            reasoning: None,
        }
    }

    /// Attach a reasoning string
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

/// A structured activity with its computed footprint
///
/// Serializes flat: the structured fields plus `co2e`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedActivity {
    /// The extracted activity
    #[serde(flatten)]
    pub activity: StructuredActivity,

    /// kg CO₂e, non-negative, rounded to 3 decimal places
    pub co2e: f64,
}

impl AnalyzedActivity {
    /// Pair an activity with its computed value
    pub fn new(activity: StructuredActivity, co2e: f64) -> Self {
        Self { activity, co2e }
    }
}
