//! Tracking lookup: fetch, guard and shape a single tracking number.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::mapper::{build_summary, map_event, RawEvent};
use crate::models::{DetailLevel, TrackingFull, TrackingView};
use crate::upstream::UpstreamClient;

/// Look up `tracking_number` upstream and shape the result per `detail`.
pub async fn track(
    client: &UpstreamClient,
    tracking_number: &str,
    detail: DetailLevel,
) -> Result<TrackingView> {
    let events = client.fetch_history(tracking_number).await?;
    let view = resolve(tracking_number, &events, detail)?;

    info!(
        tracking_number = %tracking_number,
        detail = %detail,
        upstream_events = events.len(),
        status = %view.summary().current_status,
        "tracking lookup succeeded"
    );

    Ok(view)
}

/// Shape already-unwrapped upstream events into a response view.
///
/// Fails with [`Error::NotFound`] when there are no events or when the first
/// event carries a different tracking number. Upstream answers unknown numbers
/// with an unrelated shipment instead of an empty list.
pub fn resolve(
    tracking_number: &str,
    events: &[RawEvent],
    detail: DetailLevel,
) -> Result<TrackingView> {
    let not_found = || Error::NotFound {
        tracking_number: tracking_number.to_string(),
    };

    let first = events.first().ok_or_else(not_found)?;
    if !first.belongs_to(tracking_number) {
        debug!(
            requested = %tracking_number,
            returned = %first.tracking_id(),
            "upstream record belongs to another tracking number"
        );
        return Err(not_found());
    }

    let summary = build_summary(tracking_number, events).ok_or_else(not_found)?;

    Ok(match detail {
        DetailLevel::Summary => TrackingView::Summary(summary),
        DetailLevel::Full => TrackingView::Full(TrackingFull {
            summary,
            events: events.iter().map(map_event).collect(),
        }),
    })
}
