//! Application state for the tracking service.
//!
//! Handlers share one upstream client through axum's `State` extractor.

use std::sync::Arc;

use ptx_tracking_lib::{Error as LibError, UpstreamClient};

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The upstream client could not be constructed.
    UpstreamClient(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpstreamClient(e) => write!(f, "failed to build upstream client: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UpstreamClient(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::UpstreamClient(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable and immutable after construction.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use ptx_tracking_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let client = state.upstream();
///     // ... call upstream
/// }
///
/// let state = AppState::from_config(&ServiceConfig::default()).unwrap();
/// let app = Router::new()
///     .route("/track/{tracking_number}", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    upstream: UpstreamClient,
}

impl AppState {
    /// Build state from service configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let upstream = UpstreamClient::new(&config.upstream_base_url, config.upstream_timeout)?;
        tracing::info!(
            upstream = %upstream.base_url(),
            timeout_secs = upstream.timeout().as_secs_f64(),
            "upstream client ready"
        );
        Ok(Self::from_client(upstream))
    }

    /// Create application state around an existing client.
    pub fn from_client(upstream: UpstreamClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { upstream }),
        }
    }

    /// Access the upstream client.
    pub fn upstream(&self) -> &UpstreamClient {
        &self.inner.upstream
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("upstream", &self.inner.upstream.base_url().as_str())
            .field("timeout", &self.inner.upstream.timeout())
            .finish()
    }
}
