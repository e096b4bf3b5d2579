//! Record module - the persisted form of an analyzed activity

use crate::AnalyzedActivity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Unique identifier for an activity record based on UUIDv7
///
/// UUIDv7 sorts chronologically, so records listed by id come out in the
/// order they were logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActivityId(u128);

impl ActivityId {
    /// Generate a new UUIDv7-based ActivityId
    ///
    /// # Examples
    ///
    /// ```
    /// use carbontrace_domain::ActivityId;
    ///
    /// let id = ActivityId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an ActivityId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an ActivityId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use carbontrace_domain::ActivityId;
    ///
    /// let id = ActivityId::new();
    /// let parsed = ActivityId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid activity id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since the Unix epoch encoded in the UUIDv7
    pub fn timestamp(&self) -> u64 {
        (self.0 >> 80) as u64
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for ActivityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActivityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ActivityId::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// Commit status of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommitStatus {
    /// Logged, not yet committed
    Pending,
    /// Committed; `tx_hash` is set
    Committed,
}

/// An analyzed activity plus the caller metadata it was logged with
///
/// Append-only: apart from the single `Pending → Committed` transition the
/// record never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Unique identifier
    pub id: ActivityId,

    /// Opaque identity of the user who logged the activity
    pub user_id: String,

    /// The description exactly as the user typed it
    pub raw_input: String,

    /// When the activity happened (Unix seconds)
    pub activity_date: u64,

    /// When the record was created (Unix seconds)
    pub created_at: u64,

    /// The analysis result
    pub activity: AnalyzedActivity,

    /// Commit status
    pub status: CommitStatus,

    /// Transaction reference attached on commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

impl ActivityRecord {
    /// Create a pending record
    pub fn new(
        activity: AnalyzedActivity,
        user_id: impl Into<String>,
        raw_input: impl Into<String>,
        activity_date: u64,
        created_at: u64,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            user_id: user_id.into(),
            raw_input: raw_input.into(),
            activity_date,
            created_at,
            activity,
            status: CommitStatus::Pending,
            tx_hash: None,
        }
    }

    /// CO₂e of the underlying activity
    pub fn co2e(&self) -> f64 {
        self.activity.co2e
    }

    /// Whether the record has been committed
    pub fn is_committed(&self) -> bool {
        self.status == CommitStatus::Committed
    }

    /// Move the record from Pending to Committed
    ///
    /// # Errors
    /// Returns error if the record is already committed or the hash is empty
    pub fn mark_committed(&mut self, tx_hash: impl Into<String>) -> Result<(), String> {
        let tx_hash = tx_hash.into();
        if self.is_committed() {
            return Err(format!("Activity {} is already committed", self.id));
        }
        if tx_hash.trim().is_empty() {
            return Err("Transaction hash cannot be empty".to_string());
        }
        self.status = CommitStatus::Committed;
        self.tx_hash = Some(tx_hash);
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Ordering matches the underlying u128 ordering
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = ActivityId::from_value(a);
            let id_b = ActivityId::from_value(b);
            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// String form parses back to the same id
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = ActivityId::from_value(value);
            match ActivityId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
