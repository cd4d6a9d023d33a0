//! Read-only selections over a pantry snapshot.

use chrono::{DateTime, Utc};

use crate::forecast::{is_expiring_soon, is_low};
use crate::item::InventoryItem;

/// Items at or below their threshold, ordered by name.
pub fn low_items(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    let mut low: Vec<&InventoryItem> = items.iter().filter(|item| is_low(item)).collect();
    low.sort_by(|a, b| a.name.cmp(&b.name));
    low
}

/// Items expiring within `within_days`, soonest first.
pub fn expiring_soon(
    items: &[InventoryItem],
    now: DateTime<Utc>,
    within_days: u32,
) -> Vec<&InventoryItem> {
    let mut expiring: Vec<&InventoryItem> = items
        .iter()
        .filter(|item| is_expiring_soon(item, now, within_days))
        .collect();
    // Every selected item has an expiration date.
    expiring.sort_by_key(|item| item.expiration_date);
    expiring
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn low_items_sorted_by_name() {
        let now = test_time();
        let items = vec![
            InventoryItem::new("Salt", now).with_quantity(0.0),
            InventoryItem::new("Beans", now).with_quantity(9.0),
            InventoryItem::new("Cumin", now).with_quantity(1.0),
        ];
        let names: Vec<&str> = low_items(&items).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cumin", "Salt"]);
    }

    #[test]
    fn expiring_soon_sorted_by_date() {
        let now = test_time();
        let items = vec![
            InventoryItem::new("Spinach", now).with_expiration(now + TimeDelta::days(5)),
            InventoryItem::new("Old milk", now).with_expiration(now - TimeDelta::days(1)),
            InventoryItem::new("Berries", now).with_expiration(now + TimeDelta::days(2)),
            InventoryItem::new("Canned soup", now).with_expiration(now + TimeDelta::days(400)),
            InventoryItem::new("Honey", now),
        ];
        let names: Vec<&str> = expiring_soon(&items, now, 7)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Berries", "Spinach"]);
    }

    #[test]
    fn empty_pantry_yields_nothing() {
        assert!(low_items(&[]).is_empty());
        assert!(expiring_soon(&[], test_time(), 7).is_empty());
    }
}
