//! Shared infrastructure for the Paquetexpress tracking HTTP service.
//!
//! This crate provides the HTTP glue around `ptx-tracking-lib`:
//!
//! - [`AppState`]: Shared upstream client
//! - [`ServiceConfig`]: Port and upstream settings from the environment
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request ID, tracing span and metrics middleware
//! - [`TrackQuery`]: Query parameters of the tracking endpoint
//!
//! # Architecture
//!
//! The service follows a thin-handler pattern where all business logic resides
//! in `ptx-tracking-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Extract path and query                                   │
//! │  - Call ptx-tracking-lib                                    │
//! │  - Map errors to Problem Details                            │
//! │  - Serialize the selected view                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides upstream fixtures. Enable the
//! `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_lookup_completed, record_lookup_events,
    record_lookup_failed, record_upstream_duration, MetricsConfig, MetricsError,
};
pub use middleware::{cors_layer, extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    from_lib_error, ProblemDetails, DETAIL_NOT_FOUND, DETAIL_PARSE_FAILED,
    DETAIL_UPSTREAM_FAILED, DETAIL_UPSTREAM_TIMEOUT, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_TRACKING_NOT_FOUND, PROBLEM_UPSTREAM_ERROR,
    PROBLEM_UPSTREAM_PARSE_ERROR, PROBLEM_UPSTREAM_TIMEOUT,
};
pub use request::TrackQuery;
pub use state::{AppState, AppStateError};
