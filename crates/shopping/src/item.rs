use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, Entity, ShoppingItemId};
use pantry_inventory::{Category, Unit};

/// Provenance of a shopping-list entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    #[default]
    Manual,
    PantryLow,
    MealGenerated,
}

impl SourceType {
    pub const ALL: [SourceType; 3] = [
        SourceType::Manual,
        SourceType::PantryLow,
        SourceType::MealGenerated,
    ];

    /// Wire tag (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Manual => "manual",
            SourceType::PantryLow => "pantryLow",
            SourceType::MealGenerated => "mealGenerated",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SourceType::Manual => "Manual",
            SourceType::PantryLow => "Pantry",
            SourceType::MealGenerated => "Meal Plan",
        }
    }
}

impl FromStr for SourceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown source type tag '{s}'")))
    }
}

impl core::fmt::Display for SourceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shopping-list record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: ShoppingItemId,
    pub name: String,
    pub quantity_needed: f64,
    pub unit: Unit,
    pub category: Category,
    pub source_type: SourceType,
    pub estimated_cost: Option<f64>,
    pub is_checked: bool,
    pub created_at: DateTime<Utc>,
}

impl ShoppingItem {
    /// New manual entry for one unit of `name`.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ShoppingItemId::new(),
            name: name.into(),
            quantity_needed: 1.0,
            unit: Unit::default(),
            category: Category::default(),
            source_type: SourceType::default(),
            estimated_cost: None,
            is_checked: false,
            created_at: now,
        }
    }

    pub fn with_id(mut self, id: ShoppingItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_quantity(mut self, quantity_needed: f64) -> Self {
        self.quantity_needed = quantity_needed;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_source(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    pub fn with_cost(mut self, estimated_cost: f64) -> Self {
        self.estimated_cost = Some(estimated_cost);
        self
    }

    pub fn checked(mut self, is_checked: bool) -> Self {
        self.is_checked = is_checked;
        self
    }

    /// Check the record invariants (name present, numbers finite, cost non-negative).
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "shopping item {} has an empty name",
                self.id
            )));
        }
        if !self.quantity_needed.is_finite() {
            return Err(DomainError::invariant(format!(
                "shopping item {}: quantityNeeded must be finite",
                self.id
            )));
        }
        if let Some(cost) = self.estimated_cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(DomainError::invariant(format!(
                    "shopping item {}: estimatedCost must be a finite, non-negative number (found {cost})",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

impl Entity for ShoppingItem {
    type Id = ShoppingItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
