//! Service configuration.
//!
//! Read once at startup and passed down explicitly; nothing below `main`
//! touches the process environment.

use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP listen port.
    pub port: u16,
    /// Postgres URL for profile lookups. Unset means every user prices at zero points.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Upper bound on a single profile lookup before pricing falls back to no discount.
    pub profile_lookup_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8084,
            database_url: None,
            database_max_connections: 10,
            profile_lookup_timeout: Duration::from_millis(500),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Ok(Self {
            port: parse_or(get("PORT"), "PORT", defaults.port)?,
            database_url: get("DATABASE_URL"),
            database_max_connections: parse_or(get("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?,
            profile_lookup_timeout: match get("PROFILE_LOOKUP_TIMEOUT_MS") {
                Some(ms) => Duration::from_millis(parse_or(Some(ms), "PROFILE_LOOKUP_TIMEOUT_MS", 0u64)?),
                None => defaults.profile_lookup_timeout,
            },
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v.trim().parse().with_context(|| format!("invalid {key}: {v:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Config::from_vars(vars(&[])).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::from_vars(vars(&[
            ("PORT", "9000"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("PROFILE_LOOKUP_TIMEOUT_MS", "250"),
            ("DATABASE_MAX_CONNECTIONS", " "),
        ])).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(cfg.profile_lookup_timeout, Duration::from_millis(250));
        assert_eq!(cfg.database_max_connections, 10);
    }

    #[test]
    fn test_malformed_value_is_error() {
        let err = Config::from_vars(vars(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
