//! Emission-factor table

use crate::error::FactorTableError;
use carbontrace_domain::{EmissionFactor, Unit};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::debug;

static BUILTIN: OnceLock<Arc<FactorTable>> = OnceLock::new();

/// On-disk shape of a factor table
///
/// ```toml
/// [[factors]]
/// id = "beef"
/// name = "beef"
/// value = 27.0
/// unit = "kg"
/// description = "Beef (beef herd)"
///
/// [aliases]
/// "minced beef" = "beef"
/// ```
#[derive(Debug, Deserialize)]
struct FactorFile {
    #[serde(default)]
    factors: Vec<EmissionFactor>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

/// Immutable, validated set of emission factors
///
/// Lookup is by exact factor name. The optional alias map lets a curated
/// table route extra keywords to an existing factor; the built-in table has
/// no aliases.
#[derive(Debug, Clone)]
pub struct FactorTable {
    factors: Vec<EmissionFactor>,
    by_name: HashMap<String, usize>,
    aliases: BTreeMap<String, String>,
}

impl FactorTable {
    /// Build a table, validating ids, names, values and aliases
    pub fn new(
        factors: Vec<EmissionFactor>,
        aliases: BTreeMap<String, String>,
    ) -> Result<Self, FactorTableError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for factor in &factors {
            if !ids.insert(factor.id.as_str()) {
                return Err(FactorTableError::DuplicateId(factor.id.clone()));
            }
            validate_name(&factor.name)?;
            if !names.insert(factor.name.as_str()) {
                return Err(FactorTableError::DuplicateName(factor.name.clone()));
            }
            if !factor.value.is_finite() || factor.value < 0.0 {
                return Err(FactorTableError::InvalidValue {
                    name: factor.name.clone(),
                    value: factor.value,
                });
            }
        }

        for (alias, target) in &aliases {
            validate_name(alias)?;
            if names.contains(alias.as_str()) {
                return Err(FactorTableError::DuplicateName(alias.clone()));
            }
            if !names.contains(target.as_str()) {
                return Err(FactorTableError::UnknownAliasTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        Ok(Self::index(factors, aliases))
    }

    /// The built-in factor table, shared process-wide
    pub fn builtin() -> Arc<FactorTable> {
        BUILTIN
            .get_or_init(|| Arc::new(Self::index(builtin_factors(), BTreeMap::new())))
            .clone()
    }

    /// Parse a table from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, FactorTableError> {
        let file: FactorFile = toml::from_str(toml_str)?;
        Self::new(file.factors, file.aliases)
    }

    /// Load a table from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FactorTableError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_toml(&contents)?;
        debug!(
            "Loaded {} emission factors from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Find the factor for an item keyword
    ///
    /// Exact, case-sensitive match on the factor name, then on the alias map.
    pub fn lookup(&self, item_name: &str) -> Option<&EmissionFactor> {
        let index = match self.by_name.get(item_name) {
            Some(index) => *index,
            None => {
                let target = self.aliases.get(item_name)?;
                *self.by_name.get(target)?
            }
        };
        self.factors.get(index)
    }

    /// Factor by id
    pub fn get(&self, id: &str) -> Option<&EmissionFactor> {
        self.factors.iter().find(|f| f.id == id)
    }

    /// Factors in table order
    pub fn iter(&self) -> impl Iterator<Item = &EmissionFactor> {
        self.factors.iter()
    }

    /// Factor names in table order, for prompting
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factors.iter().map(|f| f.name.as_str())
    }

    /// Alias map
    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// Number of factors
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Whether the table has no factors
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    fn index(factors: Vec<EmissionFactor>, aliases: BTreeMap<String, String>) -> Self {
        let by_name = factors
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Self {
            factors,
            by_name,
            aliases,
        }
    }
}

fn validate_name(name: &str) -> Result<(), FactorTableError> {
    if name.is_empty() || name.trim() != name || name.to_lowercase() != name {
        return Err(FactorTableError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn f(id: &str, name: &str, value: f64, unit: Unit, description: &str) -> EmissionFactor {
    EmissionFactor::new(id, name, value, unit, description)
}

fn builtin_factors() -> Vec<EmissionFactor> {
    vec![
        // Food (per kg)
        f("beef", "beef", 27.0, Unit::Kg, "Beef (beef herd)"),
        f("lamb", "lamb", 24.0, Unit::Kg, "Lamb & Mutton"),
        f("pork", "pork", 12.1, Unit::Kg, "Pig Meat"),
        f("chicken", "chicken", 6.9, Unit::Kg, "Poultry Meat"),
        f("fish", "fish", 6.1, Unit::Kg, "Farmed Fish"),
        f("cheese", "cheese", 13.5, Unit::Kg, "Cheese"),
        f("eggs", "eggs", 4.8, Unit::Kg, "Eggs"),
        f("rice", "rice", 2.7, Unit::Kg, "Rice"),
        f("tofu", "tofu", 2.0, Unit::Kg, "Tofu"),
        f("vegetables", "vegetables", 0.7, Unit::Kg, "Vegetables"),
        f("fruits", "fruits", 1.1, Unit::Kg, "Fruits"),
        f("coffee", "coffee", 17.0, Unit::Kg, "Coffee"),
        f("milk", "milk", 1.9, Unit::Kg, "Milk"),
        // Transportation (per km)
        f("car-petrol", "petrol car", 0.192, Unit::Km, "Car (petrol)"),
        f("car-diesel", "diesel car", 0.171, Unit::Km, "Car (diesel)"),
        f("car-electric", "electric car", 0.053, Unit::Km, "Car (electric)"),
        f("bus", "bus", 0.105, Unit::Km, "Bus"),
        f("train", "train", 0.041, Unit::Km, "Train"),
        f("flight-domestic", "domestic flight", 0.255, Unit::Km, "Flight (domestic)"),
        f(
            "flight-short-haul",
            "short-haul flight",
            0.156,
            Unit::Km,
            "Flight (short-haul international)",
        ),
        f(
            "flight-long-haul",
            "long-haul flight",
            0.150,
            Unit::Km,
            "Flight (long-haul international)",
        ),
        // Other (per item)
        f("t-shirt-cotton", "cotton t-shirt", 7.0, Unit::Serving, "One cotton t-shirt"),
        f("jeans", "jeans", 33.4, Unit::Serving, "One pair of jeans"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_table_is_valid() {
        let table = FactorTable::new(builtin_factors(), BTreeMap::new()).unwrap();
        assert_eq!(table.len(), 23);
        assert_eq!(FactorTable::builtin().len(), 23);
    }

    #[test]
    fn test_builtin_lookup() {
        let table = FactorTable::builtin();
        let car = table.lookup("petrol car").unwrap();
        assert_eq!(car.id, "car-petrol");
        assert_eq!(car.value, 0.192);
        assert_eq!(car.unit, Unit::Km);

        let jeans = table.lookup("jeans").unwrap();
        assert_eq!(jeans.unit, Unit::Serving);
        assert_eq!(table.get("t-shirt-cotton").unwrap().name, "cotton t-shirt");
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = FactorTable::builtin();
        assert!(table.lookup("chicken").is_some());
        assert!(table.lookup("Chicken").is_none());
        assert!(table.lookup("chicken breast").is_none());
        assert!(table.lookup(" chicken").is_none());
        assert!(table.lookup("unobtainium").is_none());
    }

    #[test]
    fn test_names_in_table_order() {
        let table = FactorTable::builtin();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names.first(), Some(&"beef"));
        assert_eq!(names.last(), Some(&"jeans"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let factors = vec![
            EmissionFactor::new("a", "beef", 27.0, Unit::Kg, ""),
            EmissionFactor::new("a", "pork", 12.1, Unit::Kg, ""),
        ];
        let result = FactorTable::new(factors, BTreeMap::new());
        assert!(matches!(result, Err(FactorTableError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let factors = vec![
            EmissionFactor::new("a", "beef", 27.0, Unit::Kg, ""),
            EmissionFactor::new("b", "beef", 20.0, Unit::Kg, ""),
        ];
        let result = FactorTable::new(factors, BTreeMap::new());
        assert!(matches!(result, Err(FactorTableError::DuplicateName(_))));
    }

    #[test]
    fn test_invalid_name_rejected() {
        for name in ["", "Beef", " beef"] {
            let factors = vec![EmissionFactor::new("a", name, 1.0, Unit::Kg, "")];
            let result = FactorTable::new(factors, BTreeMap::new());
            assert!(matches!(result, Err(FactorTableError::InvalidName(_))), "{:?}", name);
        }
    }

    #[test]
    fn test_invalid_value_rejected() {
        for value in [-1.0, f64::NAN, f64::INFINITY] {
            let factors = vec![EmissionFactor::new("a", "beef", value, Unit::Kg, "")];
            let result = FactorTable::new(factors, BTreeMap::new());
            assert!(matches!(result, Err(FactorTableError::InvalidValue { .. })));
        }
    }

    #[test]
    fn test_aliases() {
        let factors = vec![EmissionFactor::new("chicken", "chicken", 6.9, Unit::Kg, "")];
        let mut aliases = BTreeMap::new();
        aliases.insert("chicken breast".to_string(), "chicken".to_string());

        let table = FactorTable::new(factors, aliases).unwrap();
        assert_eq!(table.lookup("chicken breast").unwrap().id, "chicken");
        assert!(table.lookup("Chicken breast").is_none());
    }

    #[test]
    fn test_alias_to_unknown_factor_rejected() {
        let factors = vec![EmissionFactor::new("chicken", "chicken", 6.9, Unit::Kg, "")];
        let mut aliases = BTreeMap::new();
        aliases.insert("steak".to_string(), "beef".to_string());

        let result = FactorTable::new(factors, aliases);
        assert!(matches!(result, Err(FactorTableError::UnknownAliasTarget { .. })));
    }

    #[test]
    fn test_alias_shadowing_factor_rejected() {
        let factors = vec![
            EmissionFactor::new("chicken", "chicken", 6.9, Unit::Kg, ""),
            EmissionFactor::new("beef", "beef", 27.0, Unit::Kg, ""),
        ];
        let mut aliases = BTreeMap::new();
        aliases.insert("beef".to_string(), "chicken".to_string());

        let result = FactorTable::new(factors, aliases);
        assert!(matches!(result, Err(FactorTableError::DuplicateName(_))));
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            [[factors]]
            id = "oat-milk"
            name = "oat milk"
            value = 0.9
            unit = "kg"
            description = "Oat drink"

            [[factors]]
            id = "ebike"
            name = "e-bike"
            value = 0.008
            unit = "km"
            description = "Electric bicycle"

            [aliases]
            "oat drink" = "oat milk"
        "#;

        let table = FactorTable::from_toml(toml_str).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("oat drink").unwrap().id, "oat-milk");
        assert_eq!(table.lookup("e-bike").unwrap().unit, Unit::Km);
    }

    #[test]
    fn test_from_toml_unknown_unit() {
        let toml_str = r#"
            [[factors]]
            id = "petrol"
            name = "petrol"
            value = 2.3
            unit = "litre"
            description = "Petrol"
        "#;
        assert!(matches!(
            FactorTable::from_toml(toml_str),
            Err(FactorTableError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[factors]]\nid = \"tea\"\nname = \"tea\"\nvalue = 1.5\nunit = \"kg\"\ndescription = \"Tea\""
        )
        .unwrap();

        let table = FactorTable::from_file(file.path()).unwrap();
        assert_eq!(table.lookup("tea").unwrap().value, 1.5);
    }

    #[test]
    fn test_from_missing_file() {
        let result = FactorTable::from_file("/nonexistent/factors.toml");
        assert!(matches!(result, Err(FactorTableError::Io(_))));
    }
}
