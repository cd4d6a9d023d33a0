//! Shopping-list derivation and consolidation.
//!
//! Entries are matched by name, case-insensitively and ignoring surrounding
//! whitespace; the stored name keeps its original casing. The engine never
//! sorts: list order is existing entries first, then appended ones.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use pantry_core::ShoppingItemId;
use pantry_inventory::{InventoryItem, is_low};

use crate::item::{ShoppingItem, SourceType};

/// Quantity change for an entry already on the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityUpdate {
    pub id: ShoppingItemId,
    pub quantity_needed: f64,
}

/// What the host must write back after regenerating the list from the pantry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshPlan {
    /// Entries not yet stored.
    pub inserts: Vec<ShoppingItem>,
    /// Stored entries whose quantity grew.
    pub updates: Vec<QuantityUpdate>,
}

impl RefreshPlan {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty()
    }
}

/// One `PantryLow` entry per pantry item that is both low and recurring.
///
/// The entry asks for `low_threshold` units and carries the last paid price as
/// its cost estimate.
pub fn auto_items(inventory: &[InventoryItem], now: DateTime<Utc>) -> Vec<ShoppingItem> {
    inventory
        .iter()
        .filter(|item| item.is_recurring && is_low(item))
        .map(|item| ShoppingItem {
            id: ShoppingItemId::new(),
            name: item.name.clone(),
            quantity_needed: item.low_threshold,
            unit: item.unit,
            category: item.category,
            source_type: SourceType::PantryLow,
            estimated_cost: item.price_last_paid,
            is_checked: false,
            created_at: now,
        })
        .collect()
}

/// Fold `incoming` into `existing`.
///
/// An incoming entry whose name matches one already in the result adds its
/// quantity to the first such entry (cost and other fields of that entry are
/// left as they were); otherwise it is appended unchanged. Appended entries
/// take part in matching for the entries that follow them.
///
/// If `existing` already holds several entries with the same name, only the
/// first receives merged quantities.
pub fn merge(existing: &[ShoppingItem], incoming: &[ShoppingItem]) -> Vec<ShoppingItem> {
    let mut result: Vec<ShoppingItem> = existing.to_vec();
    let mut by_name: HashMap<String, usize> = HashMap::with_capacity(result.len());
    for (idx, item) in result.iter().enumerate() {
        by_name.entry(name_key(&item.name)).or_insert(idx);
    }

    for item in incoming {
        let key = name_key(&item.name);
        match by_name.get(&key) {
            Some(&idx) => result[idx].quantity_needed += item.quantity_needed,
            None => {
                by_name.insert(key, result.len());
                result.push(item.clone());
            }
        }
    }

    result
}

/// Regenerate pantry-driven entries and diff the merged list against `existing`.
pub fn refresh_plan(
    inventory: &[InventoryItem],
    existing: &[ShoppingItem],
    now: DateTime<Utc>,
) -> RefreshPlan {
    let merged = merge(existing, &auto_items(inventory, now));
    let stored: HashMap<ShoppingItemId, f64> = existing
        .iter()
        .map(|item| (item.id, item.quantity_needed))
        .collect();

    let mut plan = RefreshPlan::default();
    for item in merged {
        match stored.get(&item.id) {
            None => plan.inserts.push(item),
            Some(&before) if before != item.quantity_needed => plan.updates.push(QuantityUpdate {
                id: item.id,
                quantity_needed: item.quantity_needed,
            }),
            Some(_) => {}
        }
    }
    plan
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pantry_inventory::{Category, Unit};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 9, 30, 0).unwrap()
    }

    fn pantry(name: &str, quantity: f64, threshold: f64, recurring: bool) -> InventoryItem {
        InventoryItem::new(name, test_time())
            .with_quantity(quantity)
            .with_low_threshold(threshold)
            .recurring(recurring)
    }

    #[test]
    fn auto_items_only_low_and_recurring() {
        let items = vec![
            pantry("Salt", 0.0, 1.0, true),
            pantry("Pepper", 0.0, 1.0, false),
            pantry("Sugar", 5.0, 1.0, true),
        ];
        let result = auto_items(&items, test_time());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Salt");
    }

    #[test]
    fn auto_items_copy_source_fields() {
        let oats = pantry("Oats", 200.0, 500.0, true)
            .with_unit(Unit::Grams)
            .with_category(Category::Pantry)
            .with_price(3.49);
        let result = auto_items(&[oats], test_time());
        let entry = &result[0];
        assert_eq!(entry.quantity_needed, 500.0);
        assert_eq!(entry.unit, Unit::Grams);
        assert_eq!(entry.category, Category::Pantry);
        assert_eq!(entry.source_type, SourceType::PantryLow);
        assert_eq!(entry.estimated_cost, Some(3.49));
        assert_eq!(entry.created_at, test_time());
        assert!(!entry.is_checked);
    }

    #[test]
    fn auto_items_without_price_have_no_cost() {
        let result = auto_items(&[pantry("Tea", 0.0, 2.0, true)], test_time());
        assert_eq!(result[0].estimated_cost, None);
    }

    #[test]
    fn merge_sums_case_insensitive_duplicates() {
        let existing = vec![ShoppingItem::new("Milk", test_time()).with_quantity(1.0)];
        let incoming = vec![ShoppingItem::new("milk", test_time()).with_quantity(2.0)];
        let merged = merge(&existing, &incoming);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].quantity_needed, 3.0);
        assert_eq!(merged[0].name, "Milk");
        assert_eq!(merged[0].id, existing[0].id);
    }

    #[test]
    fn merge_appends_new_names() {
        let existing = vec![ShoppingItem::new("Bread", test_time())];
        let incoming = vec![ShoppingItem::new("Butter", test_time())];
        let merged = merge(&existing, &incoming);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], incoming[0]);
    }

    #[test]
    fn merge_leaves_existing_cost_untouched() {
        let existing = vec![ShoppingItem::new("Coffee", test_time()).with_cost(9.0)];
        let incoming = vec![ShoppingItem::new(" COFFEE ", test_time()).with_cost(12.0).with_quantity(2.0)];
        let merged = merge(&existing, &incoming);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].estimated_cost, Some(9.0));
        assert_eq!(merged[0].quantity_needed, 3.0);
    }

    #[test]
    fn merge_folds_repeated_incoming_names() {
        let incoming = vec![
            ShoppingItem::new("Eggs", test_time()).with_quantity(6.0),
            ShoppingItem::new("eggs", test_time()).with_quantity(6.0),
        ];
        let merged = merge(&[], &incoming);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].quantity_needed, 12.0);
    }

    #[test]
    fn merge_with_existing_duplicates_targets_first() {
        let existing = vec![
            ShoppingItem::new("Apples", test_time()).with_quantity(1.0),
            ShoppingItem::new("apples", test_time()).with_quantity(1.0),
        ];
        let incoming = vec![ShoppingItem::new("APPLES", test_time()).with_quantity(4.0)];
        let merged = merge(&existing, &incoming);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].quantity_needed, 5.0);
        assert_eq!(merged[1].quantity_needed, 1.0);
    }

    #[test]
    fn merge_empty_inputs() {
        assert!(merge(&[], &[]).is_empty());
        let existing = vec![ShoppingItem::new("Rice", test_time())];
        assert_eq!(merge(&existing, &[]), existing);
    }

    #[test]
    fn refresh_plan_splits_inserts_and_updates() {
        let now = test_time();
        let inventory = vec![
            pantry("Milk", 0.0, 2.0, true),
            pantry("Eggs", 1.0, 6.0, true),
            pantry("Flour", 3.0, 1.0, true),
        ];
        let existing = vec![
            ShoppingItem::new("milk", now).with_quantity(1.0),
            ShoppingItem::new("Batteries", now),
        ];

        let plan = refresh_plan(&inventory, &existing, now);

        assert_eq!(
            plan.updates,
            vec![QuantityUpdate {
                id: existing[0].id,
                quantity_needed: 3.0,
            }]
        );
        assert_eq!(plan.inserts.len(), 1);
        assert_eq!(plan.inserts[0].name, "Eggs");
        assert_eq!(plan.inserts[0].source_type, SourceType::PantryLow);
    }

    #[test]
    fn refresh_plan_empty_when_nothing_is_low() {
        let inventory = vec![pantry("Flour", 3.0, 1.0, true)];
        let existing = vec![ShoppingItem::new("Soap", test_time())];
        assert!(refresh_plan(&inventory, &existing, test_time()).is_empty());
    }
}
