use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::PaginationError;
use crate::pagination::DEFAULT_MAXIMUM_PAGES_TO_DISPLAY;

pub const DEFAULT_TAKE_KEY: &str = "PAGINATION_DEFAULT_TAKE";
pub const MAX_PAGES_KEY: &str = "PAGINATION_MAX_PAGES";

const DEFAULT_TAKE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_take: i64,
    pub maximum_pages_to_display: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_take: DEFAULT_TAKE,
            maximum_pages_to_display: DEFAULT_MAXIMUM_PAGES_TO_DISPLAY,
        }
    }
}

impl Config {
    pub fn try_from_env() -> Result<Self, PaginationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|e| {
            tracing::warn!("{}, using default pagination settings", e);
            Self::default()
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PaginationError> {
        let defaults = Self::default();

        let default_take = parse_var(&lookup, DEFAULT_TAKE_KEY)?
            .filter(|take: &i64| *take > 0)
            .unwrap_or(defaults.default_take);
        let maximum_pages_to_display = parse_var(&lookup, MAX_PAGES_KEY)?
            .filter(|max: &usize| *max > 0)
            .unwrap_or(defaults.maximum_pages_to_display);

        Ok(Self {
            default_take,
            maximum_pages_to_display,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, PaginationError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| PaginationError::InvalidEnv { key, value }),
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_vars_use_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_both_vars() {
        let config =
            Config::from_lookup(lookup(&[(DEFAULT_TAKE_KEY, "25"), (MAX_PAGES_KEY, " 7 ")]))
                .unwrap();
        assert_eq!(config.default_take, 25);
        assert_eq!(config.maximum_pages_to_display, 7);
    }

    #[test]
    fn non_positive_values_fall_back() {
        let config =
            Config::from_lookup(lookup(&[(DEFAULT_TAKE_KEY, "0"), (MAX_PAGES_KEY, "0")])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn garbage_is_reported() {
        let err = Config::from_lookup(lookup(&[(MAX_PAGES_KEY, "lots")])).unwrap_err();
        assert_eq!(
            err,
            PaginationError::InvalidEnv {
                key: MAX_PAGES_KEY,
                value: "lots".to_string(),
            }
        );
    }
}
