//! Depletion and expiry forecasting for a single pantry record.
//!
//! Every function here is a pure function of the record and the evaluation
//! instant `now`; nothing is cached or persisted, so callers may evaluate
//! records concurrently without coordination.

use chrono::{DateTime, TimeDelta, Utc};

use crate::item::InventoryItem;

/// Default look-ahead window for "expiring soon".
pub const DEFAULT_EXPIRING_WITHIN_DAYS: u32 = 7;

/// Items projected to run out within this many days report `RunningLow`.
pub const RUNNING_LOW_HORIZON_DAYS: f64 = 7.0;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Forecast of a pantry record at one evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastStatus {
    Ok,
    Low,
    /// Projected to run out within the running-low horizon; `days` is the
    /// whole number of days left (truncated, never rounded up).
    RunningLow { days: u32 },
    OutSoon,
    Expired,
    ExpiringSoon,
}

impl ForecastStatus {
    /// Whether the status warrants surfacing the item to the user.
    pub fn needs_attention(self) -> bool {
        !matches!(self, ForecastStatus::Ok)
    }
}

impl core::fmt::Display for ForecastStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ForecastStatus::Ok => f.write_str("OK"),
            ForecastStatus::Low => f.write_str("Low"),
            ForecastStatus::RunningLow { days } => write!(f, "{days}d left"),
            ForecastStatus::OutSoon => f.write_str("Out Soon"),
            ForecastStatus::Expired => f.write_str("Expired"),
            ForecastStatus::ExpiringSoon => f.write_str("Exp. Soon"),
        }
    }
}

/// Tunables for status evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastPolicy {
    pub expiring_within_days: u32,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        Self {
            expiring_within_days: DEFAULT_EXPIRING_WITHIN_DAYS,
        }
    }
}

impl ForecastPolicy {
    pub fn with_expiring_within_days(mut self, days: u32) -> Self {
        self.expiring_within_days = days;
        self
    }
}

/// Days of stock left at the current consumption rate (fractional), if the rate is known.
pub fn estimated_days_remaining(item: &InventoryItem) -> Option<f64> {
    let rate = item.daily_use_rate()?;
    Some(item.quantity_on_hand / rate)
}

/// Instant at which stock is projected to reach zero.
///
/// `None` when the rate is unknown or the projection falls outside the
/// representable time range.
pub fn projected_out_date(item: &InventoryItem, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let days = estimated_days_remaining(item)?;
    now.checked_add_signed(days_to_delta(days)?)
}

/// At or below the configured threshold (inclusive).
pub fn is_low(item: &InventoryItem) -> bool {
    item.quantity_on_hand <= item.low_threshold
}

/// Not yet expired, but expiring within `within_days` of `now` (inclusive).
pub fn is_expiring_soon(item: &InventoryItem, now: DateTime<Utc>, within_days: u32) -> bool {
    let Some(expiry) = item.expiration_date else {
        return false;
    };
    if expiry <= now {
        return false;
    }
    match now.checked_add_signed(TimeDelta::days(i64::from(within_days))) {
        Some(horizon) => expiry <= horizon,
        // Horizon past the end of representable time: everything after `now` is inside it.
        None => true,
    }
}

/// Status using the default policy (7-day expiry window).
pub fn forecast_status(item: &InventoryItem, now: DateTime<Utc>) -> ForecastStatus {
    forecast_status_with(item, now, &ForecastPolicy::default())
}

/// Status evaluation; the first matching rule wins:
/// expired, expiring soon, out soon / running low (rate known), low, ok.
pub fn forecast_status_with(
    item: &InventoryItem,
    now: DateTime<Utc>,
    policy: &ForecastPolicy,
) -> ForecastStatus {
    if let Some(expiry) = item.expiration_date {
        if expiry <= now {
            return ForecastStatus::Expired;
        }
    }

    if is_expiring_soon(item, now, policy.expiring_within_days) {
        return ForecastStatus::ExpiringSoon;
    }

    if let Some(days) = estimated_days_remaining(item) {
        if days < 1.0 {
            return ForecastStatus::OutSoon;
        }
        if days <= RUNNING_LOW_HORIZON_DAYS {
            return ForecastStatus::RunningLow {
                days: days.trunc() as u32,
            };
        }
    }

    if is_low(item) {
        return ForecastStatus::Low;
    }

    ForecastStatus::Ok
}

fn days_to_delta(days: f64) -> Option<TimeDelta> {
    let micros = (days * MICROS_PER_DAY).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(TimeDelta::microseconds(micros as i64))
}
