//! The decoded shape of one event off the bus.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One event as it travels the bus: a `type` tag plus an open-ended
/// JSON object payload.
///
/// The payload is kept as raw JSON on purpose. The bus carries many event
/// families (`payment.*`, `webhook.*`, `flow.*`, custom zone events) and the
/// client renders them uniformly without knowing their schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusEvent {
    /// Dotted event type, e.g. `payment.created`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload; empty object when the producer sent none.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl BusEvent {
    /// Event with the given type and an empty payload.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: Map::new(),
        }
    }

    /// Decode one wire frame.
    ///
    /// Returns `None` for anything that is not a JSON object with a string
    /// `type` field. Malformed frames are dropped, never fatal.
    #[must_use]
    pub fn decode(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// The payload's `id` field, when it carries a string one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.data.get("id").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_type_and_data() {
        let event = BusEvent::decode(r#"{"type":"payment.created","data":{"id":"pay_1","amount":4200}}"#)
            .expect("valid event");
        assert_eq!(event.event_type, "payment.created");
        assert_eq!(event.id(), Some("pay_1"));
        assert_eq!(event.data.get("amount"), Some(&json!(4200)));
    }

    #[test]
    fn missing_data_defaults_to_empty_object() {
        let event = BusEvent::decode(r#"{"type":"pong"}"#).expect("valid event");
        assert_eq!(event.event_type, "pong");
        assert!(event.data.is_empty());
        assert_eq!(event.id(), None);
    }

    #[test]
    fn unknown_top_level_fields_are_ignored() {
        let event = BusEvent::decode(r#"{"type":"zone.updated","data":{},"seq":17}"#)
            .expect("valid event");
        assert_eq!(event.event_type, "zone.updated");
    }

    #[test]
    fn rejects_non_json() {
        assert_eq!(BusEvent::decode("not json at all"), None);
    }

    #[test]
    fn rejects_missing_type() {
        assert_eq!(BusEvent::decode(r#"{"data":{"id":"x"}}"#), None);
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert_eq!(BusEvent::decode(r#"{"type":"weird","data":[1,2]}"#), None);
        assert_eq!(BusEvent::decode(r#""just a string""#), None);
        assert_eq!(BusEvent::decode("42"), None);
    }

    #[test]
    fn id_ignores_non_string_ids() {
        let event = BusEvent::decode(r#"{"type":"odd","data":{"id":99}}"#).expect("valid event");
        assert_eq!(event.id(), None);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut event = BusEvent::new("flow.completed");
        let _ = event.data.insert("id".to_string(), json!("flow_9"));
        let wire = serde_json::to_value(&event).expect("serializable");
        assert_eq!(wire, json!({"type": "flow.completed", "data": {"id": "flow_9"}}));
    }
}
