//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for Kubernetes liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Upstream host the service forwards lookups to (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_host: Option<String>,

    /// Upstream call timeout in seconds (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_timeout_secs: Option<u64>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            upstream_host: None,
            upstream_timeout_secs: None,
        }
    }

    /// Create a ready status with upstream information.
    pub fn ready(service: &str, version: &str, upstream_host: &str, timeout_secs: u64) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            upstream_host: Some(upstream_host.to_string()),
            upstream_timeout_secs: Some(timeout_secs),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            upstream_host: None,
            upstream_timeout_secs: None,
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"ptx-tracking-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Ready once the upstream client has a host to call. Upstream itself is not
/// probed.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let upstream = state.upstream();
    let Some(host) = upstream.base_url().host_str() else {
        let status = HealthStatus::not_ready(service, version, "upstream URL has no host");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    };

    let status = HealthStatus::ready(service, version, host, upstream.timeout().as_secs());
    (StatusCode::OK, Json(status)).into_response()
}
