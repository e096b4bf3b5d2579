//! Unit module - the canonical units a quantity can be expressed in

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical unit of measurement
///
/// Both extracted activities and emission factors use exactly this set.
/// Anything an AI provider reports must be mapped onto one of these before
/// it reaches the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Grams
    G,
    /// Kilograms
    Kg,
    /// Kilometres
    Km,
    /// Statute miles
    Mile,
    /// Hours of use
    Hour,
    /// Kilowatt-hours
    Kwh,
    /// One indivisible item or portion
    Serving,
}

/// Physical dimension of a unit
///
/// Conversion is only meaningful between units of the same dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// g, kg
    Mass,
    /// km, mile
    Distance,
    /// hour
    Duration,
    /// kwh
    Energy,
    /// serving
    Count,
}

impl Unit {
    /// Every canonical unit, in schema order
    pub const ALL: [Unit; 7] = [
        Unit::G,
        Unit::Kg,
        Unit::Km,
        Unit::Mile,
        Unit::Hour,
        Unit::Kwh,
        Unit::Serving,
    ];

    /// Get the unit name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Km => "km",
            Unit::Mile => "mile",
            Unit::Hour => "hour",
            Unit::Kwh => "kwh",
            Unit::Serving => "serving",
        }
    }

    /// Parse a canonical unit name (exact, lowercase)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == s)
    }

    /// Physical dimension of this unit
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::G | Unit::Kg => Dimension::Mass,
            Unit::Km | Unit::Mile => Dimension::Distance,
            Unit::Hour => Dimension::Duration,
            Unit::Kwh => Dimension::Energy,
            Unit::Serving => Dimension::Count,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid unit: {}", s))
    }
}
