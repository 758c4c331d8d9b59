//! Application configuration, loaded from environment variables at startup.
//!
//! A `.env` file in the working directory is honoured for local use.

use std::path::PathBuf;
use tracing::Level;

use crate::services::Latency;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Listing dataset; the bundled one when unset
    pub listings_path: Option<PathBuf>,
    /// Favorites dataset; the bundled one when unset
    pub favorites_path: Option<PathBuf>,
    pub latency: Latency,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listings_path: None,
            favorites_path: None,
            latency: Latency::none(),
            log_level: Level::INFO,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listings_path = lookup("LISTINGS_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let favorites_path = lookup("FAVORITES_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let latency = match lookup("SIMULATE_LATENCY") {
            None => Latency::none(),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Latency::simulated(),
                "" | "0" | "false" | "no" | "off" => Latency::none(),
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "SIMULATE_LATENCY".to_string(),
                        format!("'{}' is not a boolean", raw),
                    ))
                }
            },
        };

        let log_level_str = lookup("LOG_LEVEL").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "LOG_LEVEL".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            listings_path,
            favorites_path,
            latency,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key: &str| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.listings_path.is_none());
        assert!(config.favorites_path.is_none());
        assert!(!config.latency.is_enabled());
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("LISTINGS_PATH", "/srv/listings.json"),
            ("FAVORITES_PATH", ""),
            ("SIMULATE_LATENCY", "True"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.listings_path, Some(PathBuf::from("/srv/listings.json")));
        assert!(config.favorites_path.is_none());
        assert!(config.latency.is_enabled());
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup(&[("SIMULATE_LATENCY", "sometimes")])).unwrap_err();
        assert!(err.to_string().contains("SIMULATE_LATENCY"));

        let err = Config::from_lookup(lookup(&[("LOG_LEVEL", "loud")])).unwrap_err();
        assert!(err.to_string().contains("LOG_LEVEL"));
    }
}
