//! Error types for factor tables

use thiserror::Error;

/// Errors raised while building or loading a factor table
#[derive(Debug, Error)]
pub enum FactorTableError {
    /// Failed to read the table file
    #[error("Failed to read factor table: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse factor table TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two factors share an id
    #[error("Duplicate factor id: {0}")]
    DuplicateId(String),

    /// Two factors (or a factor and an alias) share a name
    #[error("Duplicate factor name: {0}")]
    DuplicateName(String),

    /// Name is empty, padded, or not lowercase
    #[error("Invalid factor name '{0}': names must be non-empty, trimmed and lowercase")]
    InvalidName(String),

    /// Value is negative or not finite
    #[error("Invalid value {value} for factor '{name}'")]
    InvalidValue {
        /// Factor name
        name: String,
        /// Offending value
        value: f64,
    },

    /// Alias points at a name that is not in the table
    #[error("Alias '{alias}' points at unknown factor '{target}'")]
    UnknownAliasTarget {
        /// Alias keyword
        alias: String,
        /// Missing factor name
        target: String,
    },
}
