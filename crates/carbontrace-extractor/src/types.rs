//! Wire shape of the extraction output and its validation

use carbontrace_domain::{ActivityCategory, StructuredActivity, Unit};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Activity as returned by the LLM, before validation
///
/// Field doc comments become the descriptions in the output schema.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(title = "StructuredActivity")]
pub(crate) struct ActivityCandidate {
    /// The primary category of the activity.
    #[schemars(schema_with = "category_schema")]
    pub category: String,

    /// A concise, descriptive name for the activity, e.g. "Lunch with Chicken" or "Drive to work".
    pub activity_name: String,

    /// The primary item keyword for footprint calculation, e.g. "chicken", "beef", "petrol car", "bus". Must be lowercase.
    pub item_name: String,

    /// The numerical quantity of the activity, expressed in `unit`.
    #[serde(default)]
    pub quantity: Option<f64>,

    /// The unit of measurement for the quantity.
    #[serde(default)]
    #[schemars(schema_with = "unit_schema")]
    pub unit: Option<String>,

    /// A brief explanation for the categorization and detail extraction.
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl ActivityCandidate {
    /// Validate and normalize into a structured activity
    pub fn into_structured(self) -> Result<StructuredActivity, String> {
        let category = ActivityCategory::parse(&self.category)
            .ok_or_else(|| format!("unknown category '{}'", self.category))?;

        let activity_name = self.activity_name.trim().to_string();
        if activity_name.is_empty() {
            return Err("activityName is empty".to_string());
        }

        let item_name = self.item_name.trim().to_lowercase();
        if item_name.is_empty() {
            return Err("itemName is empty".to_string());
        }

        let (quantity, unit) = match (self.quantity, self.unit.as_deref()) {
            // Single indivisible item with no count or measurement
            (None, None) => (1.0, Unit::Serving),
            (None, Some(raw)) => (1.0, parse_unit(raw)?),
            (Some(_), None) => return Err("quantity given without a unit".to_string()),
            (Some(q), Some(raw)) => (q, parse_unit(raw)?),
        };

        if !quantity.is_finite() {
            return Err(format!("quantity {} is not a finite number", quantity));
        }
        if quantity < 0.0 {
            return Err(format!("quantity {} is negative", quantity));
        }

        let reasoning = self
            .reasoning
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(StructuredActivity {
            category,
            activity_name,
            item_name,
            quantity,
            unit,
            reasoning,
        })
    }
}

fn parse_unit(raw: &str) -> Result<Unit, String> {
    canonical_unit(raw).ok_or_else(|| format!("unknown unit '{}'", raw))
}

/// Map a unit spelling onto a canonical [`Unit`]
///
/// Case-insensitive; accepts the canonical names plus common plural and
/// abbreviated forms. Returns `None` for anything outside the seven units.
pub fn canonical_unit(raw: &str) -> Option<Unit> {
    let normalized = raw.trim().to_lowercase().replace(['-', '_'], " ");
    let unit = match normalized.as_str() {
        "g" | "gram" | "grams" | "gr" => Unit::G,
        "kg" | "kgs" | "kilogram" | "kilograms" | "kilo" | "kilos" => Unit::Kg,
        "km" | "kms" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Unit::Km,
        "mile" | "miles" | "mi" => Unit::Mile,
        "hour" | "hours" | "hr" | "hrs" | "h" => Unit::Hour,
        "kwh" | "kw h" | "kilowatt hour" | "kilowatt hours" => Unit::Kwh,
        "serving" | "servings" | "item" | "items" | "piece" | "pieces" | "unit" | "units" => {
            Unit::Serving
        }
        _ => return None,
    };
    Some(unit)
}

/// JSON schema sent to the provider for structured output
///
/// Every field except `reasoning` is marked required so the provider is
/// asked for a complete answer; [`ActivityCandidate::into_structured`] still
/// applies the 1-serving default when a provider omits quantity and unit.
pub fn output_schema() -> Result<String, serde_json::Error> {
    let mut root = schemars::schema_for!(ActivityCandidate);
    if let Some(object) = root.schema.object.as_mut() {
        object.required.insert("category".to_string());
        object.required.insert("quantity".to_string());
        object.required.insert("unit".to_string());
    }
    serde_json::to_string(&root)
}

fn category_schema(_: &mut SchemaGenerator) -> Schema {
    string_enum(ActivityCategory::ALL.iter().map(|c| c.as_str()))
}

fn unit_schema(_: &mut SchemaGenerator) -> Schema {
    string_enum(Unit::ALL.iter().map(|u| u.as_str()))
}

fn string_enum<'a>(values: impl Iterator<Item = &'a str>) -> Schema {
    SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        enum_values: Some(values.map(|v| serde_json::Value::String(v.to_string())).collect()),
        ..Default::default()
    }
    .into()
}
