use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, InventoryItemId, ShoppingItemId};
use pantry_inventory::{Category, InventoryItem, Unit};
use pantry_shopping::{ShoppingItem, SourceType};

/// On-disk backup document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub schema_version: i64,
    pub exported_at: DateTime<Utc>,
    pub pantry_items: Vec<InventoryItemRecord>,
    pub grocery_items: Vec<ShoppingItemRecord>,
}

/// Just enough of a document to decide whether it can be read at all.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentHeader {
    pub schema_version: i64,
}

/// Pantry record as stored in a backup. Enum fields travel as their wire tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemRecord {
    pub id: InventoryItemId,
    pub name: String,
    pub category: String,
    pub unit_type: String,
    pub quantity_on_hand: f64,
    pub low_threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_daily_use: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_purchased_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_last_paid: Option<f64>,
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shopping-list record as stored in a backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemRecord {
    pub id: ShoppingItemId,
    pub name: String,
    pub quantity_needed: f64,
    pub unit_type: String,
    pub category: String,
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    pub is_checked: bool,
    pub created_at: DateTime<Utc>,
}

/// Decoded, validated contents of a document, ready to replace a store's records.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupSnapshot {
    pub exported_at: DateTime<Utc>,
    pub inventory: Vec<InventoryItem>,
    pub shopping: Vec<ShoppingItem>,
}

impl From<&InventoryItem> for InventoryItemRecord {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            category: item.category.as_str().to_string(),
            unit_type: item.unit.as_str().to_string(),
            quantity_on_hand: item.quantity_on_hand,
            low_threshold: item.low_threshold,
            average_daily_use: item.average_daily_use,
            last_purchased_date: item.last_purchased_date,
            expiration_date: item.expiration_date,
            price_last_paid: item.price_last_paid,
            is_recurring: item.is_recurring,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<&ShoppingItem> for ShoppingItemRecord {
    fn from(item: &ShoppingItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity_needed: item.quantity_needed,
            unit_type: item.unit.as_str().to_string(),
            category: item.category.as_str().to_string(),
            source_type: item.source_type.as_str().to_string(),
            estimated_cost: item.estimated_cost,
            is_checked: item.is_checked,
            created_at: item.created_at,
        }
    }
}

impl InventoryItemRecord {
    /// Rebuild the domain record, keeping the stored id.
    pub fn into_item(self) -> DomainResult<InventoryItem> {
        let item = InventoryItem {
            id: self.id,
            category: tag_or_default(&self.category, "category"),
            unit: tag_or_default(&self.unit_type, "unitType"),
            name: self.name,
            quantity_on_hand: self.quantity_on_hand,
            low_threshold: self.low_threshold,
            average_daily_use: self.average_daily_use,
            last_purchased_date: self.last_purchased_date,
            expiration_date: self.expiration_date,
            price_last_paid: self.price_last_paid,
            is_recurring: self.is_recurring,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        item.validate()?;
        Ok(item)
    }
}

impl ShoppingItemRecord {
    /// Rebuild the domain record, keeping the stored id.
    pub fn into_item(self) -> DomainResult<ShoppingItem> {
        let item = ShoppingItem {
            id: self.id,
            unit: tag_or_default::<Unit>(&self.unit_type, "unitType"),
            category: tag_or_default::<Category>(&self.category, "category"),
            source_type: tag_or_default::<SourceType>(&self.source_type, "sourceType"),
            name: self.name,
            quantity_needed: self.quantity_needed,
            estimated_cost: self.estimated_cost,
            is_checked: self.is_checked,
            created_at: self.created_at,
        };
        item.validate()?;
        Ok(item)
    }
}

impl BackupDocument {
    pub fn new(
        exported_at: DateTime<Utc>,
        inventory: &[InventoryItem],
        shopping: &[ShoppingItem],
    ) -> Self {
        Self {
            schema_version: super::SCHEMA_VERSION,
            exported_at,
            pantry_items: inventory.iter().map(InventoryItemRecord::from).collect(),
            grocery_items: shopping.iter().map(ShoppingItemRecord::from).collect(),
        }
    }

    /// Convert every record, failing on the first invalid one or a repeated id.
    pub fn into_snapshot(self) -> DomainResult<BackupSnapshot> {
        let mut inventory_ids = HashSet::with_capacity(self.pantry_items.len());
        let mut inventory = Vec::with_capacity(self.pantry_items.len());
        for record in self.pantry_items {
            if !inventory_ids.insert(record.id) {
                return Err(DomainError::invariant(format!(
                    "pantry item id {} appears more than once",
                    record.id
                )));
            }
            inventory.push(record.into_item()?);
        }

        let mut shopping_ids = HashSet::with_capacity(self.grocery_items.len());
        let mut shopping = Vec::with_capacity(self.grocery_items.len());
        for record in self.grocery_items {
            if !shopping_ids.insert(record.id) {
                return Err(DomainError::invariant(format!(
                    "shopping item id {} appears more than once",
                    record.id
                )));
            }
            shopping.push(record.into_item()?);
        }

        Ok(BackupSnapshot {
            exported_at: self.exported_at,
            inventory,
            shopping,
        })
    }
}

/// Unknown tags fall back to the type's default rather than failing the import.
fn tag_or_default<T>(tag: &str, field: &str) -> T
where
    T: core::str::FromStr + Default,
{
    tag.parse().unwrap_or_else(|_| {
        tracing::warn!(field, tag, "unknown tag in backup record; using default");
        T::default()
    })
}
