//! Shopping-list domain module.
//!
//! Derives shopping-list entries from pantry state, merges them into an
//! existing list, and totals estimated costs. All operations take snapshots
//! and return new values; persisting them is the caller's job.

pub mod cost;
pub mod grocery;
pub mod item;

pub use cost::{estimated_total, remaining_count, unchecked_total};
pub use grocery::{QuantityUpdate, RefreshPlan, auto_items, merge, refresh_plan};
pub use item::{ShoppingItem, SourceType};
