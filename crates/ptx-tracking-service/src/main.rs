//! Paquetexpress shipment tracking HTTP microservice.
//!
//! This service looks up a tracking number at the Paquetexpress history
//! endpoint and returns a normalized summary or the full event history.
//!
//! # Endpoints
//!
//! - `GET /track/{tracking_number}?detail=summary|full` - Tracking lookup
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `UPSTREAM_BASE_URL` - Tracking history endpoint (default: Paquetexpress)
//! - `UPSTREAM_TIMEOUT_SECS` - Upstream timeout in seconds (default: 15)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint toggle and path

use std::net::SocketAddr;

use tracing::{error, info};

use ptx_tracking_service::app;
use ptx_tracking_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env();
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Log but don't fail - metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        port = config.port,
        upstream = %config.upstream_base_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "starting tracking service"
    );

    let state = AppState::from_config(&config).map_err(|e| {
        error!(error = %e, upstream = %config.upstream_base_url, "failed to build application state");
        e
    })?;

    let app = app(state, &metrics_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
