//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Minimum description length after trimming (characters)
    pub min_text_length: usize,

    /// Maximum description length after trimming (characters)
    pub max_text_length: usize,

    /// Maximum time for a single provider call (seconds)
    pub extraction_timeout_secs: u64,

    /// Maximum known item keywords listed in the prompt
    pub known_items_limit: usize,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.min_text_length > self.max_text_length {
            return Err("min_text_length cannot exceed max_text_length".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Strict preset: the 10-character minimum of the logging form, short timeout
    pub fn strict() -> Self {
        Self {
            min_text_length: 10,
            max_text_length: 1_000,
            extraction_timeout_secs: 30,
            known_items_limit: 50,
        }
    }

    /// Lenient preset: long descriptions and slow local models
    pub fn lenient() -> Self {
        Self {
            min_text_length: 1,
            max_text_length: 10_000,
            extraction_timeout_secs: 180,
            known_items_limit: 200,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_text_length: 1,
            max_text_length: 2_000,
            extraction_timeout_secs: 60,
            known_items_limit: 50,
        }
    }
}
