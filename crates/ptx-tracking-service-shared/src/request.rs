//! Request types for the tracking endpoint.

use axum::extract::{rejection::QueryRejection, Query};
use serde::{Deserialize, Serialize};

use ptx_tracking_lib::DetailLevel;

use crate::ProblemDetails;

/// Query string of `GET /track/{tracking_number}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackQuery {
    /// Response verbosity; `summary` when omitted.
    #[serde(default)]
    pub detail: DetailLevel,
}

impl TrackQuery {
    /// Turn axum's query extraction result into a query or a 422 problem.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    pub fn from_extracted(
        extracted: Result<Query<TrackQuery>, QueryRejection>,
        request_id: &str,
    ) -> Result<Self, Box<ProblemDetails>> {
        extracted.map(|Query(query)| query).map_err(|rejection| {
            Box::new(ProblemDetails::invalid_request(
                rejection.body_text(),
                request_id,
            ))
        })
    }
}
