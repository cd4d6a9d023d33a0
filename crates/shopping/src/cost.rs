//! Cost aggregation over a shopping list.
//!
//! Entries without an estimate count as zero.

use crate::item::ShoppingItem;

/// Sum of estimated costs over every entry.
pub fn estimated_total(items: &[ShoppingItem]) -> f64 {
    total(items.iter())
}

/// Sum of estimated costs over entries not yet checked off.
pub fn unchecked_total(items: &[ShoppingItem]) -> f64 {
    total(items.iter().filter(|item| !item.is_checked))
}

/// Entries still to pick up.
pub fn remaining_count(items: &[ShoppingItem]) -> usize {
    items.iter().filter(|item| !item.is_checked).count()
}

fn total<'a>(items: impl Iterator<Item = &'a ShoppingItem>) -> f64 {
    items.map(|item| item.estimated_cost.unwrap_or(0.0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn entry(name: &str, cost: Option<f64>, checked: bool) -> ShoppingItem {
        let mut item = ShoppingItem::new(name, Utc.with_ymd_and_hms(2025, 2, 3, 12, 0, 0).unwrap()).checked(checked);
        item.estimated_cost = cost;
        item
    }

    #[test]
    fn unchecked_total_excludes_checked_items() {
        let items = vec![
            entry("A", Some(5.0), false),
            entry("B", Some(3.0), true),
            entry("C", Some(2.0), false),
        ];
        assert_eq!(unchecked_total(&items), 7.0);
        assert_eq!(remaining_count(&items), 2);
    }

    #[test]
    fn estimated_total_ignores_missing_costs() {
        let items = vec![entry("A", Some(5.0), false), entry("B", None, false)];
        assert_eq!(estimated_total(&items), 5.0);
    }

    #[test]
    fn empty_list_totals_zero() {
        assert_eq!(estimated_total(&[]), 0.0);
        assert_eq!(unchecked_total(&[]), 0.0);
        assert_eq!(remaining_count(&[]), 0);
    }

    proptest! {
        /// Property: unchecked total never exceeds the full total for non-negative costs.
        #[test]
        fn unchecked_never_exceeds_total(
            rows in proptest::collection::vec((proptest::option::of(0.0f64..500.0), any::<bool>()), 0..50)
        ) {
            let items: Vec<ShoppingItem> = rows
                .into_iter()
                .map(|(cost, checked)| entry("x", cost, checked))
                .collect();
            prop_assert!(unchecked_total(&items) <= estimated_total(&items) + 1e-9);
        }
    }
}
