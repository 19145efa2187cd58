//! Normalized tracking records returned to callers.
//!
//! These types never mention upstream field names; the translation from the
//! upstream vocabulary lives in [`crate::mapper`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single normalized tracking event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub date: String,
    pub time: String,
    pub branch: String,
    pub branch_code: String,
    pub city: String,
    pub status: String,
    pub event_id: String,
    pub timestamp: String,
}

/// Shipment overview derived from the first and last upstream events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingSummary {
    /// Always equal to the tracking number the caller asked for.
    pub tracking_number: String,
    pub guide: String,
    pub origin: String,
    pub destination: String,
    pub promise_date: String,
    pub delivery_type: String,
    pub current_status: String,
    pub current_location: String,
    pub current_branch: String,
    /// Trimmed date and raw time of the most recent event, space separated.
    pub last_update: String,
}

/// Summary plus the complete event history in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingFull {
    #[serde(flatten)]
    pub summary: TrackingSummary,
    pub events: Vec<TrackingEvent>,
}

/// Verbosity requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Summary fields only (default).
    #[default]
    Summary,
    /// Summary fields plus every event.
    Full,
}

impl DetailLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Summary => "summary",
            DetailLevel::Full => "full",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response shape selected by [`DetailLevel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TrackingView {
    Summary(TrackingSummary),
    Full(TrackingFull),
}

impl TrackingView {
    /// The summary portion, present in both shapes.
    pub fn summary(&self) -> &TrackingSummary {
        match self {
            TrackingView::Summary(summary) => summary,
            TrackingView::Full(full) => &full.summary,
        }
    }

    /// Number of events carried in the response (zero for summaries).
    pub fn event_count(&self) -> usize {
        match self {
            TrackingView::Summary(_) => 0,
            TrackingView::Full(full) => full.events.len(),
        }
    }
}
