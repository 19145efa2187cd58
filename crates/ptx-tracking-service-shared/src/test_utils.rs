//! Test utilities for handler and endpoint testing.
//!
//! Fixtures mimic what the upstream history endpoint returns.

use serde_json::{json, Value};

/// Upstream path the fixtures are served under.
pub const UPSTREAM_HISTORY_PATH: &str = "/ptxws/rest/api/v1/guia/historico";

/// Known tracking numbers used across tests.
pub mod fixture_numbers {
    /// Shipment present in the two-event fixture.
    pub const KNOWN: &str = "ABC123";

    /// Shipment upstream answers with when it does not know a number.
    pub const UNRELATED: &str = "XYZ999";
}

/// Wrap a JSON payload the way upstream does.
pub fn wrap_envelope(payload: &Value) -> String {
    format!("Resultado({})", payload)
}

/// Upstream path for a tracking number, relative to the mock server root.
pub fn upstream_path(tracking_number: &str) -> String {
    format!("{}/{}/@1@2@3@4@5", UPSTREAM_HISTORY_PATH, tracking_number)
}

/// Single delivered event for `tracking_number`.
pub fn delivered_event(tracking_number: &str) -> Value {
    json!({
        "rastreo": tracking_number,
        "guia": "G1",
        "fecha": "01/01/24",
        "hora": "10:00",
        "status": "Entregado",
        "sucursal": "Guadalajara Centro",
        "sucursalOrigen": "GDL01",
        "ciudadEvento": "Guadalajara",
        "ciudadDestino": "Guadalajara",
        "eventoId": "EV-2",
        "fechahora": 1704103200000_i64,
        "promesa": " 02/01/24 ",
        "tipoEntrega": "Domicilio"
    })
}

/// Two-event history (picked up in Tijuana, delivered in Guadalajara).
pub fn two_event_history(tracking_number: &str) -> Value {
    json!([
        {
            "rastreo": tracking_number,
            "guia": "G1",
            "fecha": "30/12/23 ",
            "hora": "08:15",
            "status": "Recolectado",
            "sucursal": "Tijuana Otay",
            "sucursalOrigen": "TIJ02",
            "ciudadEvento": "Tijuana",
            "ciudadDestino": "Guadalajara",
            "eventoId": "EV-1",
            "fechahora": "2023-12-30 08:15:00",
            "promesa": "  02/01/24",
            "tipoEntrega": "Domicilio"
        },
        delivered_event(tracking_number)
    ])
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_envelope_unwraps() {
        let body = wrap_envelope(&two_event_history(fixture_numbers::KNOWN));
        let events = ptx_tracking_lib::unwrap_envelope(&body).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].belongs_to(fixture_numbers::KNOWN));
    }

    #[test]
    fn test_upstream_path() {
        assert_eq!(
            upstream_path("ABC123"),
            "/ptxws/rest/api/v1/guia/historico/ABC123/@1@2@3@4@5"
        );
    }

    #[test]
    fn test_request_id_unique() {
        assert_ne!(test_request_id(), test_request_id());
    }
}
