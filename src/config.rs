//! Runtime configuration from environment variables
//!
//! | Variable             | Default                           |
//! |----------------------|-----------------------------------|
//! | `DATA_PATH`          | `seasonal_tourism_data_full.csv`  |
//! | `PORT`               | `3000`                            |
//! | `TOP_STATES`         | `5`                               |
//! | `TOP_PLACES`         | `5`                               |
//! | `ALTERNATIVES_TOP_N` | `2`                               |

use std::path::PathBuf;
use std::str::FromStr;

use crate::analytics::{DEFAULT_TOP_PLACES, DEFAULT_TOP_STATES};
use crate::recommend::DEFAULT_ALTERNATIVES;

pub const DEFAULT_DATA_PATH: &str = "seasonal_tourism_data_full.csv";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub port: u16,
    pub top_states: usize,
    pub top_places: usize,
    pub alternatives: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            top_states: DEFAULT_TOP_STATES,
            top_places: DEFAULT_TOP_PLACES,
            alternatives: DEFAULT_ALTERNATIVES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values keep their default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            data_path: lookup("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            top_states: parse_or("TOP_STATES", lookup("TOP_STATES"), defaults.top_states),
            top_places: parse_or("TOP_PLACES", lookup("TOP_PLACES"), defaults.top_places),
            alternatives: parse_or(
                "ALTERNATIVES_TOP_N",
                lookup("ALTERNATIVES_TOP_N"),
                defaults.alternatives,
            ),
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{}={:?} is not valid; using {}", key, value, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.alternatives, 2);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let env: HashMap<&str, &str> = [
            ("DATA_PATH", "data/tourism.parquet"),
            ("PORT", "8080"),
            ("TOP_STATES", "three"),
            ("ALTERNATIVES_TOP_N", " 4 "),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.data_path, PathBuf::from("data/tourism.parquet"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.top_states, 5);
        assert_eq!(config.alternatives, 4);
    }
}
