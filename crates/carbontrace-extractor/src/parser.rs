//! Parse LLM output into a structured activity

use crate::error::ExtractorError;
use crate::types::ActivityCandidate;
use carbontrace_domain::StructuredActivity;
use serde_json::Value;

/// Parse an LLM completion into a validated [`StructuredActivity`]
///
/// Accepts a bare JSON object or one wrapped in a Markdown code block. Any
/// schema violation fails the whole parse; there are no partial results.
pub fn parse_llm_response(response: &str) -> Result<StructuredActivity, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    // Some models wrap a single answer in an array
    let object = match json {
        Value::Object(_) => json,
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        _ => {
            return Err(ExtractorError::InvalidFormat(
                "Expected a single JSON object".to_string(),
            ))
        }
    };

    let candidate: ActivityCandidate = serde_json::from_value(object)
        .map_err(|e| ExtractorError::InvalidFormat(format!("Schema mismatch: {}", e)))?;

    candidate
        .into_structured()
        .map_err(ExtractorError::InvalidFormat)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty response".to_string()));
    }

    if let Some(body) = trimmed.strip_prefix("```") {
        // The closing fence may be missing or share a line with the JSON
        let body = body.strip_suffix("```").unwrap_or(body);
        let body = body
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            .trim();
        if body.is_empty() {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }
        Ok(body.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
