//! Router and handlers for the tracking HTTP service.
//!
//! The binary in `main.rs` only loads configuration and serves [`app`];
//! everything request-facing lives here so endpoint tests can drive the real
//! router.

use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, warn};

use ptx_tracking_lib::{track, TrackingView};
use ptx_tracking_service_shared::{
    cors_layer, from_lib_error, health_live, health_ready, metrics_handler,
    record_lookup_completed, record_lookup_events, record_lookup_failed,
    record_upstream_duration, AppState, MetricsConfig, MetricsLayer, ProblemDetails, RequestId,
    TrackQuery,
};

/// HTTP response - either a tracking view or an RFC 9457 error.
#[derive(Debug)]
pub enum Response {
    Success(TrackingView),
    Error(ProblemDetails),
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(view) => (StatusCode::OK, Json(view)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router.
///
/// The metrics endpoint is mounted at `metrics.path` only when metrics are
/// enabled and the path is absolute.
pub fn app(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut router = Router::new()
        .route("/track/{tracking_number}", get(track_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled && metrics.path.starts_with('/') {
        router = router.route(&metrics.path, get(metrics_handler));
    } else if metrics.enabled {
        warn!(path = %metrics.path, "metrics path must start with '/', endpoint not mounted");
    }

    router
        .layer(MetricsLayer)
        .layer(cors_layer())
        .with_state(state)
}

/// Handle GET /track/{tracking_number} requests.
async fn track_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(tracking_number): Path<String>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Response {
    let query = match TrackQuery::from_extracted(query, request_id.as_str()) {
        Ok(query) => query,
        Err(problem) => {
            warn!(
                request_id = %request_id,
                detail = problem.detail.as_deref().unwrap_or(""),
                "rejected tracking query"
            );
            record_lookup_failed("invalid_query");
            return Response::Error(*problem);
        }
    };

    info!(
        request_id = %request_id,
        tracking_number = %tracking_number,
        detail = %query.detail,
        "handling tracking request"
    );

    let started = Instant::now();
    let result = track(state.upstream(), &tracking_number, query.detail).await;

    match result {
        Ok(view) => {
            record_upstream_duration(started.elapsed(), "ok");
            record_lookup_completed(query.detail.as_str());
            if let TrackingView::Full(full) = &view {
                record_lookup_events(full.events.len());
            }

            info!(
                request_id = %request_id,
                tracking_number = %tracking_number,
                events = view.event_count(),
                "tracking request completed"
            );

            Response::Success(view)
        }
        Err(e) => {
            let reason = e.reason();
            record_upstream_duration(started.elapsed(), reason);
            record_lookup_failed(reason);

            warn!(
                request_id = %request_id,
                tracking_number = %tracking_number,
                reason = reason,
                error = %e,
                "tracking request failed"
            );

            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}
