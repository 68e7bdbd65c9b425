//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Default listener address.
pub const DEFAULT_BIND: &str = "127.0.0.1:6969";

/// Default log filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Log filter directives, in `RUST_LOG` syntax
    pub log_filter: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// CLI overrides win over the environment, which wins over defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        log_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(bind_override, log_override, |key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    fn from_lookup<F>(
        bind_override: Option<SocketAddr>,
        log_override: Option<String>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_var_or(&lookup, "SERVER_BIND", DEFAULT_BIND)?,
        };
        let log_filter = log_override
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(ServerConfig { bind, log_filter })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "RUST_LOG".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if let Err(e) = EnvFilter::try_new(&self.log_filter) {
            return Err(ConfigError::Invalid {
                var: "RUST_LOG".to_string(),
                reason: e.to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable, falling back to `default` when unset
fn parse_var_or<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var: key.to_string(),
        reason: format!("'{raw}': {e}"),
    })
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
    fn test_defaults() {
        let config = ServerConfig::from_lookup(None, None, lookup(&[])).unwrap();
        assert_eq!(config.bind, DEFAULT_BIND.parse().unwrap());
        assert_eq!(config.log_filter, "info");
        config.validate().unwrap();
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = ServerConfig::from_lookup(
            None,
            None,
            lookup(&[("SERVER_BIND", "0.0.0.0:7000"), ("RUST_LOG", "gomoku=debug")]),
        )
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0:7000".parse().unwrap());
        assert_eq!(config.log_filter, "gomoku=debug");
    }

    #[test]
    fn test_cli_overrides_environment() {
        let config = ServerConfig::from_lookup(
            Some("127.0.0.1:9000".parse().unwrap()),
            Some("warn".to_string()),
            lookup(&[("SERVER_BIND", "not an address"), ("RUST_LOG", "debug")]),
        )
        .unwrap();
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_invalid_bind_is_reported() {
        let err = ServerConfig::from_lookup(None, None, lookup(&[("SERVER_BIND", "localhost")]))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("SERVER_BIND"));
        assert!(msg.contains("localhost"));
    }

    #[test]
    fn test_config_validation_empty_filter() {
        let config = ServerConfig {
            bind: "127.0.0.1:8080".parse().unwrap(),
            log_filter: "  ".to_string(),
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_validation_bad_filter() {
        let config = ServerConfig {
            bind: "127.0.0.1:8080".parse().unwrap(),
            log_filter: "gomoku=loud".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
