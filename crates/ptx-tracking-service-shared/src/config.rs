//! Service configuration read from the environment.
//!
//! - `SERVICE_PORT`: HTTP port (default: 8080)
//! - `UPSTREAM_BASE_URL`: Tracking history endpoint (default: Paquetexpress)
//! - `UPSTREAM_TIMEOUT_SECS`: Upstream call timeout in seconds (default: 15)

use std::time::Duration;

use ptx_tracking_lib::{DEFAULT_UPSTREAM_TIMEOUT, DEFAULT_UPSTREAM_URL};

const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the HTTP service and its upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Port the HTTP listener binds on all interfaces.
    pub port: u16,
    /// Base URL the tracking number is appended to.
    pub upstream_base_url: String,
    /// Timeout for a single upstream call.
    pub upstream_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upstream_base_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    ///
    /// Unparseable numbers fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or_default(&lookup, "SERVICE_PORT", defaults.port);

        let upstream_base_url = lookup("UPSTREAM_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.upstream_base_url);

        let upstream_timeout = match parse_or_default(&lookup, "UPSTREAM_TIMEOUT_SECS", 0u64) {
            0 => defaults.upstream_timeout,
            secs => Duration::from_secs(secs),
        };

        Self {
            port,
            upstream_base_url,
            upstream_timeout,
        }
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key = key, value = %raw, default = %default, "invalid value, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVICE_PORT", "9090"),
            ("UPSTREAM_BASE_URL", " http://localhost:1234/historico "),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.upstream_base_url, "http://localhost:1234/historico");
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("SERVICE_PORT", "eighty"),
            ("UPSTREAM_BASE_URL", "   "),
            ("UPSTREAM_TIMEOUT_SECS", "0"),
        ]);
        assert_eq!(config, ServiceConfig::default());
    }
}
