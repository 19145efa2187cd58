//! Translation from upstream records to normalized tracking types.
//!
//! This is the only module that knows the upstream (Spanish) field names.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{TrackingEvent, TrackingSummary};

const KEY_DATE: &str = "fecha";
const KEY_TIME: &str = "hora";
const KEY_BRANCH: &str = "sucursal";
const KEY_BRANCH_CODE: &str = "sucursalOrigen";
const KEY_CITY: &str = "ciudadEvento";
const KEY_STATUS: &str = "status";
const KEY_EVENT_ID: &str = "eventoId";
const KEY_TIMESTAMP: &str = "fechahora";
const KEY_GUIDE: &str = "guia";
const KEY_DESTINATION: &str = "ciudadDestino";
const KEY_PROMISE: &str = "promesa";
const KEY_DELIVERY_TYPE: &str = "tipoEntrega";
const KEY_TRACKING_ID: &str = "rastreo";

/// One record of the upstream history array, kept as an untyped map.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawEvent(Map<String, Value>);

impl RawEvent {
    /// String form of a field; absent keys and `null` yield an empty string.
    fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Tracking number upstream embedded in this record, in string form.
    pub fn tracking_id(&self) -> String {
        self.text(KEY_TRACKING_ID)
    }

    /// Whether this record belongs to `tracking_number`.
    ///
    /// Only a JSON string equal to `tracking_number` byte for byte matches;
    /// a numeric `rastreo` never does.
    pub fn belongs_to(&self, tracking_number: &str) -> bool {
        matches!(self.0.get(KEY_TRACKING_ID), Some(Value::String(id)) if id == tracking_number)
    }
}

impl From<Map<String, Value>> for RawEvent {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Map a raw upstream record to a [`TrackingEvent`].
pub fn map_event(raw: &RawEvent) -> TrackingEvent {
    TrackingEvent {
        date: raw.text(KEY_DATE),
        time: raw.text(KEY_TIME),
        branch: raw.text(KEY_BRANCH),
        branch_code: raw.text(KEY_BRANCH_CODE),
        city: raw.text(KEY_CITY),
        status: raw.text(KEY_STATUS),
        event_id: raw.text(KEY_EVENT_ID),
        timestamp: raw.text(KEY_TIMESTAMP),
    }
}

/// Build the summary from the first (origin) and last (current) records.
///
/// Returns `None` when `events` is empty.
pub fn build_summary(tracking_number: &str, events: &[RawEvent]) -> Option<TrackingSummary> {
    let first = events.first()?;
    let last = events.last()?;

    Some(TrackingSummary {
        tracking_number: tracking_number.to_string(),
        guide: first.text(KEY_GUIDE),
        origin: first.text(KEY_CITY),
        destination: first.text(KEY_DESTINATION),
        promise_date: first.text(KEY_PROMISE).trim().to_string(),
        delivery_type: first.text(KEY_DELIVERY_TYPE),
        current_status: last.text(KEY_STATUS),
        current_location: last.text(KEY_CITY),
        current_branch: last.text(KEY_BRANCH),
        last_update: format!("{} {}", last.text(KEY_DATE).trim(), last.text(KEY_TIME)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawEvent {
        serde_json::from_value(value).expect("object literal")
    }

    #[test]
    fn map_event_renames_fields() {
        let event = map_event(&raw(json!({
            "fecha": "01/01/24",
            "hora": "10:00",
            "sucursal": "Guadalajara Centro",
            "sucursalOrigen": "GDL01",
            "ciudadEvento": "Guadalajara",
            "status": "En transito",
            "eventoId": "EV1",
            "fechahora": "2024-01-01 10:00"
        })));

        assert_eq!(event.date, "01/01/24");
        assert_eq!(event.time, "10:00");
        assert_eq!(event.branch, "Guadalajara Centro");
        assert_eq!(event.branch_code, "GDL01");
        assert_eq!(event.city, "Guadalajara");
        assert_eq!(event.status, "En transito");
        assert_eq!(event.event_id, "EV1");
        assert_eq!(event.timestamp, "2024-01-01 10:00");
    }

    #[test]
    fn map_event_defaults_missing_keys() {
        assert_eq!(map_event(&RawEvent::default()), TrackingEvent::default());

        let partial = map_event(&raw(json!({ "status": "Recolectado", "hora": null })));
        assert_eq!(partial.status, "Recolectado");
        assert_eq!(partial.time, "");
        assert_eq!(partial.city, "");
    }

    #[test]
    fn map_event_stringifies_numeric_timestamp() {
        let event = map_event(&raw(json!({ "fechahora": 1704103200000_i64 })));
        assert_eq!(event.timestamp, "1704103200000");
    }

    #[test]
    fn build_summary_empty_is_none() {
        assert!(build_summary("ABC123", &[]).is_none());
    }

    #[test]
    fn build_summary_single_event_is_first_and_last() {
        let events = vec![raw(json!({
            "rastreo": "ABC123",
            "guia": "G1",
            "fecha": "01/01/24 ",
            "hora": "10:00",
            "status": "Entregado",
            "ciudadEvento": "Monterrey",
            "sucursal": "MTY Norte",
            "ciudadDestino": "Monterrey",
            "promesa": "  02/01/24  ",
            "tipoEntrega": "Domicilio"
        }))];

        let summary = build_summary("ABC123", &events).expect("non-empty");
        assert_eq!(summary.tracking_number, "ABC123");
        assert_eq!(summary.guide, "G1");
        assert_eq!(summary.origin, "Monterrey");
        assert_eq!(summary.current_location, "Monterrey");
        assert_eq!(summary.current_branch, "MTY Norte");
        assert_eq!(summary.current_status, "Entregado");
        assert_eq!(summary.promise_date, "02/01/24");
        assert_eq!(summary.delivery_type, "Domicilio");
        assert_eq!(summary.last_update, "01/01/24 10:00");
    }

    #[test]
    fn build_summary_uses_first_for_origin_and_last_for_status() {
        let events = vec![
            raw(json!({
                "guia": "G1",
                "ciudadEvento": "Guadalajara",
                "ciudadDestino": "Tijuana",
                "status": "Recolectado",
                "sucursal": "GDL",
                "fecha": "01/01/24",
                "hora": "08:00"
            })),
            raw(json!({
                "guia": "G-other",
                "ciudadEvento": "Tijuana",
                "ciudadDestino": "ignored",
                "status": "Entregado",
                "sucursal": "TIJ",
                "fecha": " 03/01/24",
                "hora": " 17:45"
            })),
        ];

        let summary = build_summary("ABC123", &events).expect("non-empty");
        assert_eq!(summary.guide, "G1");
        assert_eq!(summary.origin, "Guadalajara");
        assert_eq!(summary.destination, "Tijuana");
        assert_eq!(summary.current_status, "Entregado");
        assert_eq!(summary.current_location, "Tijuana");
        assert_eq!(summary.current_branch, "TIJ");
        // Only the date is trimmed.
        assert_eq!(summary.last_update, "03/01/24  17:45");
    }

    #[test]
    fn build_summary_missing_date_and_time() {
        let summary = build_summary("X", &[RawEvent::default()]).expect("non-empty");
        assert_eq!(summary.last_update, " ");
        assert_eq!(summary.promise_date, "");
    }

    #[test]
    fn belongs_to_is_exact() {
        let event = raw(json!({ "rastreo": "ABC123" }));
        assert!(event.belongs_to("ABC123"));
        assert!(!event.belongs_to("abc123"));
        assert!(!event.belongs_to("ABC123 "));
        assert!(!RawEvent::default().belongs_to("ABC123"));
    }

    #[test]
    fn belongs_to_rejects_non_string_ids() {
        let numeric = raw(json!({ "rastreo": 123 }));
        assert!(!numeric.belongs_to("123"));
        assert_eq!(numeric.tracking_id(), "123");

        assert!(!raw(json!({ "rastreo": null })).belongs_to(""));
        assert!(!raw(json!({ "rastreo": true })).belongs_to("true"));
    }
}
