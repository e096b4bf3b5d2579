//! LLM prompt engineering for activity extraction

use carbontrace_domain::{ActivityCategory, Unit};

/// Builds the extraction prompt for one activity description
pub struct PromptBuilder {
    description: String,
    known_items: Vec<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            known_items: Vec::new(),
        }
    }

    /// Item keywords the emission-factor table knows about
    pub fn with_known_items(mut self, items: Vec<String>) -> Self {
        self.known_items = items;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Role and field rules
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Allowed values, generated from the domain enums
        prompt.push_str(&format!("Allowed categories: {}\n", allowed_categories()));
        prompt.push_str(&format!("Allowed units: {}\n\n", allowed_units()));

        // 3. Keywords the calculator can price
        if !self.known_items.is_empty() {
            prompt.push_str(
                "Known item keywords (use one of these exactly when it fits the activity):\n",
            );
            prompt.push_str(&self.known_items.join(", "));
            prompt.push_str("\n\n");
        }

        // 4. Worked examples
        prompt.push_str(EXAMPLES);
        prompt.push_str("\n\n");

        // 5. The description to analyze
        prompt.push_str("Now, parse the following user activity:\n");
        prompt.push_str(&format!("\"{}\"\n\n", self.description.trim()));

        // 6. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

fn allowed_categories() -> String {
    ActivityCategory::ALL
        .iter()
        .map(|c| format!("'{}'", c.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn allowed_units() -> String {
    Unit::ALL
        .iter()
        .map(|u| format!("'{}'", u.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are an AI assistant for a carbon footprint tracker. Your task is to parse a user's natural language description of one activity into structured data.

Your response MUST contain these fields:
1. category: the most appropriate category for the activity.
2. activityName: a short, descriptive name for the activity.
3. itemName: the single most relevant lowercase keyword for calculation. This is critical. Examples: "chicken", "beef", "petrol car", "bus", "train", "domestic flight", "cotton t-shirt".
4. quantity: the numerical amount. Default to 1 if it is a single item (like "a t-shirt").
5. unit: the unit of measurement for quantity. Use 'serving' for a single item with no measurement. If the user gives grams, use 'g'; kilograms, 'kg'; kilometres, 'km'; miles, 'mile'.
   The quantity MUST be expressed in the unit you output. If you report a value in a different unit than the user stated, convert the number too: 15 miles reported in kilometres is quantity 24.14 with unit 'km', never quantity 15 with unit 'km'.
6. reasoning: briefly explain your logic."#;

const EXAMPLES: &str = r#"Example 1:
User input: "I drove 15km to work in my petrol car"
Output:
{"category": "transportation", "activityName": "Drive to work", "itemName": "petrol car", "quantity": 15, "unit": "km", "reasoning": "The user drove a petrol car for 15 km, which falls under transportation."}

Example 2:
User input: "Had a 200g fried chicken for lunch"
Output:
{"category": "food_consumption", "activityName": "Lunch with Fried Chicken", "itemName": "chicken", "quantity": 200, "unit": "g", "reasoning": "The user ate 200g of chicken, which is a food consumption activity."}

Example 3:
User input: "I bought a new pair of jeans"
Output:
{"category": "shopping_lifestyle", "activityName": "Bought new jeans", "itemName": "jeans", "quantity": 1, "unit": "serving", "reasoning": "The user bought one item (a pair of jeans), which is a shopping activity."}"#;

const OUTPUT_FORMAT_REMINDER: &str =
    "Remember: Return ONLY one valid JSON object, no markdown code blocks, no explanations.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_description() {
        let prompt = PromptBuilder::new("I took the bus for 12 km").build();
        assert!(prompt.contains("\"I took the bus for 12 km\""));
    }

    #[test]
    fn test_prompt_lists_all_categories_and_units() {
        let prompt = PromptBuilder::new("test").build();
        for category in ActivityCategory::ALL {
            assert!(prompt.contains(&format!("'{}'", category.as_str())));
        }
        for unit in Unit::ALL {
            assert!(prompt.contains(&format!("'{}'", unit.as_str())));
        }
    }

    #[test]
    fn test_prompt_includes_instructions_and_examples() {
        let prompt = PromptBuilder::new("test").build();
        assert!(prompt.contains("lowercase keyword"));
        assert!(prompt.contains("quantity 24.14 with unit 'km'"));
        assert!(prompt.contains("Bought new jeans"));
        assert!(prompt.ends_with(OUTPUT_FORMAT_REMINDER));
    }

    #[test]
    fn test_prompt_known_items() {
        let prompt = PromptBuilder::new("test")
            .with_known_items(vec!["beef".to_string(), "petrol car".to_string()])
            .build();
        assert!(prompt.contains("Known item keywords"));
        assert!(prompt.contains("beef, petrol car"));
    }

    #[test]
    fn test_prompt_without_known_items() {
        let prompt = PromptBuilder::new("test").build();
        assert!(!prompt.contains("Known item keywords"));
    }

    #[test]
    fn test_description_is_trimmed() {
        let prompt = PromptBuilder::new("  ate rice \n").build();
        assert!(prompt.contains("\"ate rice\""));
    }
}
