//! Closed vocabularies shared by pantry and shopping records.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use pantry_core::DomainError;

/// Aisle-style grouping for a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Pantry,
    Frozen,
    Beverages,
    Snacks,
    Household,
    Personal,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Produce,
        Category::Dairy,
        Category::Meat,
        Category::Pantry,
        Category::Frozen,
        Category::Beverages,
        Category::Snacks,
        Category::Household,
        Category::Personal,
        Category::Other,
    ];

    /// Wire tag (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Pantry => "pantry",
            Category::Frozen => "frozen",
            Category::Beverages => "beverages",
            Category::Snacks => "snacks",
            Category::Household => "household",
            Category::Personal => "personal",
            Category::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Pantry => "Pantry",
            Category::Frozen => "Frozen",
            Category::Beverages => "Beverages",
            Category::Snacks => "Snacks",
            Category::Household => "Household",
            Category::Personal => "Personal",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown category tag '{s}'")))
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of measure for quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Count,
    Grams,
    Ounces,
    Pounds,
    Liters,
    Milliliters,
    Cups,
    Tablespoons,
    Teaspoons,
}

impl Unit {
    pub const ALL: [Unit; 9] = [
        Unit::Count,
        Unit::Grams,
        Unit::Ounces,
        Unit::Pounds,
        Unit::Liters,
        Unit::Milliliters,
        Unit::Cups,
        Unit::Tablespoons,
        Unit::Teaspoons,
    ];

    /// Wire tag (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Count => "count",
            Unit::Grams => "grams",
            Unit::Ounces => "ounces",
            Unit::Pounds => "pounds",
            Unit::Liters => "liters",
            Unit::Milliliters => "milliliters",
            Unit::Cups => "cups",
            Unit::Tablespoons => "tablespoons",
            Unit::Teaspoons => "teaspoons",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Unit::Count => "Count",
            Unit::Grams => "Grams",
            Unit::Ounces => "Ounces",
            Unit::Pounds => "Pounds",
            Unit::Liters => "Liters",
            Unit::Milliliters => "Milliliters",
            Unit::Cups => "Cups",
            Unit::Tablespoons => "Tablespoons",
            Unit::Teaspoons => "Teaspoons",
        }
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown unit tag '{s}'")))
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back_to_the_same_variant() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        for u in Unit::ALL {
            assert_eq!(u.as_str().parse::<Unit>().unwrap(), u);
        }
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!("Dairy".parse::<Category>().is_err());
        assert!("kilograms".parse::<Unit>().is_err());
    }

    #[test]
    fn defaults_match_manual_entry() {
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(Unit::default(), Unit::Count);
    }
}
