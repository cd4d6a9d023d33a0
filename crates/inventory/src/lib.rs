//! Pantry inventory domain module.
//!
//! This crate contains the pantry record and the forecasting rules derived
//! from it, implemented purely as deterministic domain logic (no IO, no
//! storage). Evaluation instants are always passed in as `now`.

pub mod catalog;
pub mod forecast;
pub mod item;
pub mod queries;

pub use catalog::{Category, Unit};
pub use forecast::{
    DEFAULT_EXPIRING_WITHIN_DAYS, ForecastPolicy, ForecastStatus, RUNNING_LOW_HORIZON_DAYS,
    estimated_days_remaining, forecast_status, forecast_status_with, is_expiring_soon, is_low, projected_out_date,
};
pub use item::InventoryItem;
pub use queries::{expiring_soon, low_items};
