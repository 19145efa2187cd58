//! Tracing subscriber setup for the tracking service.
//!
//! Settings come from `LOG_FORMAT`, `RUST_LOG` and `SERVICE_NAME`. JSON
//! output carries the request span fields (request id, method, path) on
//! every line logged while handling a request.
//!
//! ```no_run
//! use ptx_tracking_service_shared::logging::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::from_env());
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "info";

/// Service name reported when `SERVICE_NAME` is unset.
pub const DEFAULT_SERVICE: &str = "ptx-tracking";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Pretty multi-line output for local runs.
    Text,
}

impl LogFormat {
    /// `text` and `pretty` select [`LogFormat::Text`]; anything else is JSON.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives, e.g. `info,ptx_tracking_lib=debug`.
    pub filter: String,
    pub service: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            filter: DEFAULT_FILTER.to_string(),
            service: DEFAULT_SERVICE.to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            format: non_empty("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.format),
            filter: non_empty("RUST_LOG").unwrap_or(defaults.filter),
            service: non_empty("SERVICE_NAME").unwrap_or(defaults.service),
        }
    }

    /// Parse the configured directives, falling back to [`DEFAULT_FILTER`].
    ///
    /// The second value is the parse error when the fallback was taken.
    pub fn env_filter(&self) -> (EnvFilter, Option<String>) {
        match EnvFilter::try_new(&self.filter) {
            Ok(filter) => (filter, None),
            Err(e) => (EnvFilter::new(DEFAULT_FILTER), Some(e.to_string())),
        }
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging(config: &LoggingConfig) {
    let (filter, filter_error) = config.env_filter();
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init(),
    }

    if let Some(error) = filter_error {
        tracing::warn!(filter = %config.filter, error = %error, "invalid RUST_LOG, using default filter");
    }
    tracing::info!(service = %config.service, format = ?config.format, "logging initialized");
}
