use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, Entity, InventoryItemId};

use crate::catalog::{Category, Unit};

/// Pantry record: one stocked product and what is known about its consumption.
///
/// Records are plain snapshots supplied by the host; engines read them and
/// return derived values, they never mutate or persist them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    pub category: Category,
    pub unit: Unit,
    pub quantity_on_hand: f64,
    /// Quantity at or below which the item counts as low.
    pub low_threshold: f64,
    /// Consumption rate in units per day. Zero or negative means unknown.
    pub average_daily_use: Option<f64>,
    pub last_purchased_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub price_last_paid: Option<f64>,
    /// Eligible for automatic shopping-list generation.
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// New manually entered item: nothing on hand, threshold of one, recurring.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: InventoryItemId::new(),
            name: name.into(),
            category: Category::default(),
            unit: Unit::default(),
            quantity_on_hand: 0.0,
            low_threshold: 1.0,
            average_daily_use: None,
            last_purchased_date: None,
            expiration_date: None,
            price_last_paid: None,
            is_recurring: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: InventoryItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_quantity(mut self, quantity_on_hand: f64) -> Self {
        self.quantity_on_hand = quantity_on_hand;
        self
    }

    pub fn with_low_threshold(mut self, low_threshold: f64) -> Self {
        self.low_threshold = low_threshold;
        self
    }

    pub fn with_daily_use(mut self, average_daily_use: f64) -> Self {
        self.average_daily_use = Some(average_daily_use);
        self
    }

    pub fn with_expiration(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    pub fn with_last_purchased(mut self, purchased_at: DateTime<Utc>) -> Self {
        self.last_purchased_date = Some(purchased_at);
        self
    }

    pub fn with_price(mut self, price_last_paid: f64) -> Self {
        self.price_last_paid = Some(price_last_paid);
        self
    }

    pub fn recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }

    /// Known consumption rate, if any.
    ///
    /// A stored rate of zero or below is treated exactly like an absent one.
    pub fn daily_use_rate(&self) -> Option<f64> {
        self.average_daily_use.filter(|rate| *rate > 0.0)
    }

    /// Check the record invariants (name present, quantities finite and non-negative).
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!("pantry item {} has an empty name", self.id)));
        }
        ensure_non_negative(self.id, "quantityOnHand", self.quantity_on_hand)?;
        ensure_non_negative(self.id, "lowThreshold", self.low_threshold)?;
        if let Some(price) = self.price_last_paid {
            ensure_non_negative(self.id, "priceLastPaid", price)?;
        }
        if let Some(rate) = self.average_daily_use {
            if !rate.is_finite() {
                return Err(DomainError::invariant(format!(
                    "pantry item {}: averageDailyUse must be finite",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

fn ensure_non_negative(id: InventoryItemId, field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::invariant(format!(
            "pantry item {id}: {field} must be a finite, non-negative number (found {value})"
        )));
    }
    Ok(())
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
