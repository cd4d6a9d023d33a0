//! Configuration loading and representation.
//!
//! Values come from environment variables; anything missing or unparsable
//! falls back to its default with a warning.

use pantry_inventory::{DEFAULT_EXPIRING_WITHIN_DAYS, ForecastPolicy};

pub const EXPIRING_WITHIN_DAYS_VAR: &str = "PANTRY_EXPIRING_WITHIN_DAYS";
pub const BACKUP_PRETTY_VAR: &str = "PANTRY_BACKUP_PRETTY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PantryConfig {
    /// Look-ahead window for "expiring soon".
    pub expiring_within_days: u32,
    /// Indent backup documents for human reading.
    pub pretty_backups: bool,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            expiring_within_days: DEFAULT_EXPIRING_WITHIN_DAYS,
            pretty_backups: true,
        }
    }
}

impl PantryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            expiring_within_days: parse_or(
                &lookup,
                EXPIRING_WITHIN_DAYS_VAR,
                defaults.expiring_within_days,
                |raw| raw.parse().ok(),
            ),
            pretty_backups: parse_or(&lookup, BACKUP_PRETTY_VAR, defaults.pretty_backups, parse_flag),
        }
    }

    pub fn forecast_policy(&self) -> ForecastPolicy {
        ForecastPolicy::default().with_expiring_within_days(self.expiring_within_days)
    }
}

fn parse_or<T: core::fmt::Debug>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match parse(raw.trim()) {
        Some(value) => value,
        None => {
            tracing::warn!("{key}={raw:?} is not valid; using default {default:?}");
            default
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PantryConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, PantryConfig::default());
        assert_eq!(config.forecast_policy(), ForecastPolicy::default());
    }

    #[test]
    fn reads_overrides() {
        let config = PantryConfig::from_lookup(lookup_from(&[
            (EXPIRING_WITHIN_DAYS_VAR, " 3 "),
            (BACKUP_PRETTY_VAR, "off"),
        ]));
        assert_eq!(config.expiring_within_days, 3);
        assert!(!config.pretty_backups);
        assert_eq!(config.forecast_policy().expiring_within_days, 3);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = PantryConfig::from_lookup(lookup_from(&[
            (EXPIRING_WITHIN_DAYS_VAR, "-2"),
            (BACKUP_PRETTY_VAR, "maybe"),
        ]));
        assert_eq!(config, PantryConfig::default());
    }
}
