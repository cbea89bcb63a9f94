//! Runtime configuration, loaded from environment variables.

use std::time::Duration;

use thiserror::Error;

use crate::press::cache::DEFAULT_CACHE_CAPACITY;
use crate::press::client::DEFAULT_MAX_TOKENS;

pub const DEFAULT_MODEL: &str = "gpt-5-nano";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Generation settings for a publishing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer token for the generation API. Only publishing needs it.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    /// Pause before every generation request.
    pub request_delay: Duration,
    pub cache_capacity: usize,
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// Environment variables:
    /// - `OPENAI_API_KEY` - API key for the generation service
    /// - `GAZETTE_MODEL` - model name (default: `gpt-5-nano`)
    /// - `GAZETTE_API_BASE` - API base URL (default: `https://api.openai.com/v1`)
    /// - `GAZETTE_REQUEST_DELAY_MS` - pause before each request (default: 1000)
    /// - `GAZETTE_CACHE_CAPACITY` - completions kept in memory (default: 500)
    /// - `GAZETTE_MAX_TOKENS` - budget for legacy completion models (default: 400)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let request_delay = match get("GAZETTE_REQUEST_DELAY_MS") {
            Some(v) => Duration::from_millis(parse_number("GAZETTE_REQUEST_DELAY_MS", &v)?),
            None => defaults.request_delay,
        };
        let cache_capacity = match get("GAZETTE_CACHE_CAPACITY") {
            Some(v) => parse_number("GAZETTE_CACHE_CAPACITY", &v)?,
            None => defaults.cache_capacity,
        };
        let max_tokens = match get("GAZETTE_MAX_TOKENS") {
            Some(v) => parse_number("GAZETTE_MAX_TOKENS", &v)?,
            None => defaults.max_tokens,
        };

        Ok(Config {
            api_key: get("OPENAI_API_KEY"),
            api_base: get("GAZETTE_API_BASE").unwrap_or(defaults.api_base),
            model: get("GAZETTE_MODEL").unwrap_or(defaults.model),
            request_delay,
            cache_capacity,
            max_tokens,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.model, "gpt-5-nano");
        assert_eq!(config.request_delay, Duration::from_secs(1));
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("GAZETTE_MODEL", "gpt-4o"),
            ("GAZETTE_API_BASE", "http://localhost:8080/v1"),
            ("GAZETTE_REQUEST_DELAY_MS", "0"),
            ("GAZETTE_CACHE_CAPACITY", "16"),
            ("GAZETTE_MAX_TOKENS", "256"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.api_base, "http://localhost:8080/v1");
        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.max_tokens, 256);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = Config::from_lookup(lookup(&[("GAZETTE_CACHE_CAPACITY", "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber { name: "GAZETTE_CACHE_CAPACITY", value: "lots".into() }
        );
    }
}
