//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use ptx_tracking_lib::Error as LibError;

/// Problem type URI for tracking numbers upstream has no data for.
pub const PROBLEM_TRACKING_NOT_FOUND: &str = "/problems/tracking-not-found";

/// Problem type URI for upstream calls that exceeded the timeout.
pub const PROBLEM_UPSTREAM_TIMEOUT: &str = "/problems/upstream-timeout";

/// Problem type URI for upstream failures (non-2xx status, unreachable host).
pub const PROBLEM_UPSTREAM_ERROR: &str = "/problems/upstream-error";

/// Problem type URI for upstream bodies that could not be unwrapped.
pub const PROBLEM_UPSTREAM_PARSE_ERROR: &str = "/problems/upstream-parse-error";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Detail shared by empty histories and foreign records.
pub const DETAIL_NOT_FOUND: &str = "No tracking data found for this number";

/// Detail for upstream timeouts.
pub const DETAIL_UPSTREAM_TIMEOUT: &str = "Upstream API timed out";

/// Detail for envelope or payload parse failures.
pub const DETAIL_PARSE_FAILED: &str = "Failed to parse upstream response";

/// Detail for connection-level upstream failures.
pub const DETAIL_UPSTREAM_FAILED: &str = "Upstream request failed";

/// RFC 9457 Problem Details response structure.
///
/// Provides a consistent format for error responses across all endpoints.
///
/// # Example
///
/// ```
/// use ptx_tracking_service_shared::{ProblemDetails, PROBLEM_TRACKING_NOT_FOUND};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_TRACKING_NOT_FOUND,
///     "Tracking Not Found",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("No tracking data found for this number")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 422 Unprocessable Entity problem for invalid parameters.
    pub fn invalid_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for tracking numbers without data.
    pub fn tracking_not_found(request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_TRACKING_NOT_FOUND,
            "Tracking Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(DETAIL_NOT_FOUND)
        .with_request_id(request_id)
    }

    /// Create a 502 Bad Gateway problem for an upstream timeout.
    pub fn upstream_timeout(request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_UPSTREAM_TIMEOUT,
            "Upstream Timeout",
            StatusCode::BAD_GATEWAY,
        )
        .with_detail(DETAIL_UPSTREAM_TIMEOUT)
        .with_request_id(request_id)
    }

    /// Create a 502 Bad Gateway problem for a failed upstream exchange.
    pub fn upstream_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_UPSTREAM_ERROR, "Upstream Error", StatusCode::BAD_GATEWAY)
            .with_detail(detail)
            .with_request_id(request_id)
    }

    /// Create a 502 Bad Gateway problem for an unparseable upstream body.
    pub fn upstream_parse_error(request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_UPSTREAM_PARSE_ERROR,
            "Upstream Parse Error",
            StatusCode::BAD_GATEWAY,
        )
        .with_detail(DETAIL_PARSE_FAILED)
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

/// Implement IntoResponse for axum to return ProblemDetails as HTTP responses.
impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UpstreamTimeout => ProblemDetails::upstream_timeout(request_id),
        LibError::UpstreamStatus { status } => {
            ProblemDetails::upstream_error(format!("Upstream returned {}", status), request_id)
        }
        LibError::UpstreamTransport(_) => {
            ProblemDetails::upstream_error(DETAIL_UPSTREAM_FAILED, request_id)
        }
        LibError::MalformedEnvelope | LibError::InvalidPayload(_) => {
            ProblemDetails::upstream_parse_error(request_id)
        }
        LibError::NotFound { .. } => ProblemDetails::tracking_not_found(request_id),
        LibError::InvalidUpstreamUrl { .. } => {
            ProblemDetails::internal_error("Upstream endpoint is misconfigured", request_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_TRACKING_NOT_FOUND,
            "Tracking Not Found",
            StatusCode::NOT_FOUND,
        );
        assert_eq!(problem.type_uri, PROBLEM_TRACKING_NOT_FOUND);
        assert_eq!(problem.title, "Tracking Not Found");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.content_type, "application/problem+json");
    }

    #[test]
    fn test_problem_details_invalid_request() {
        let problem = ProblemDetails::invalid_request("unknown variant `verbose`", "req-123");
        assert_eq!(problem.status, 422);
        assert_eq!(problem.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::tracking_not_found("req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/tracking-not-found\""));
        assert!(json.contains("\"status\":404"));
        assert!(json.contains("\"detail\":\"No tracking data found for this number\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_from_lib_error_timeout() {
        let problem = from_lib_error(&LibError::UpstreamTimeout, "req-lib");
        assert_eq!(problem.type_uri, PROBLEM_UPSTREAM_TIMEOUT);
        assert_eq!(problem.status, 502);
        assert_eq!(problem.detail.as_deref(), Some("Upstream API timed out"));
    }

    #[test]
    fn test_from_lib_error_transport() {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .expect_err("invalid url");
        let problem = from_lib_error(&LibError::from(err), "req-lib");
        assert_eq!(problem.type_uri, PROBLEM_UPSTREAM_ERROR);
        assert_eq!(problem.status, 502);
        assert_eq!(problem.detail.as_deref(), Some(DETAIL_UPSTREAM_FAILED));
    }

    #[test]
    fn test_from_lib_error_status_includes_code() {
        let problem = from_lib_error(&LibError::UpstreamStatus { status: 500 }, "req-lib");
        assert_eq!(problem.status, 502);
        assert_eq!(problem.detail.as_deref(), Some("Upstream returned 500"));
    }

    #[test]
    fn test_from_lib_error_parse_failures() {
        let invalid = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        for error in [LibError::MalformedEnvelope, LibError::InvalidPayload(invalid)] {
            let problem = from_lib_error(&error, "req-parse");
            assert_eq!(problem.type_uri, PROBLEM_UPSTREAM_PARSE_ERROR);
            assert_eq!(problem.status, 502);
            assert_eq!(problem.detail.as_deref(), Some(DETAIL_PARSE_FAILED));
        }
    }

    #[test]
    fn test_from_lib_error_not_found() {
        let error = LibError::NotFound {
            tracking_number: "ABC123".to_string(),
        };
        let problem = from_lib_error(&error, "req-404");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.detail.as_deref(), Some(DETAIL_NOT_FOUND));
    }

    #[test]
    fn test_into_response_sets_problem_content_type() {
        let response = ProblemDetails::upstream_timeout("req-x").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/problem+json"
        );
    }
}
