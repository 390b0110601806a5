use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PipelineError;
use crate::json_format::to_pretty_string;

pub type JsonObject = Map<String, Value>;

pub const LOOKUP_FIELD: &str = "lookup";

/// Inbound CRM webhook payload.
///
/// The payload is kept verbatim (unknown fields and key order included) so the
/// raw record and queue message match what the CRM sent. Only `event.lead_id`
/// and `event.data` are interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadEvent {
    payload: Value,
    source_text: Option<String>,
}

impl LeadEvent {
    pub fn from_value(payload: Value) -> Self {
        Self {
            payload,
            source_text: None,
        }
    }

    /// Parses a JSON body and remembers the exact text for forwarding.
    pub fn from_json_str(body: &str) -> Result<Self, PipelineError> {
        let payload: Value = serde_json::from_str(body)?;
        Ok(Self {
            payload,
            source_text: Some(body.to_string()),
        })
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Resolves `event.lead_id`. Empty strings and non-scalar values count as missing.
    pub fn lead_id(&self) -> Option<String> {
        match self.payload.get("event")?.get("lead_id")? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    pub fn require_lead_id(&self) -> Result<String, PipelineError> {
        self.lead_id().ok_or(PipelineError::MissingLeadId)
    }

    /// Display fields under `event.data`; `None` when absent or not an object.
    pub fn data(&self) -> Option<&JsonObject> {
        self.payload.get("event")?.get("data")?.as_object()
    }

    pub fn data_field(&self, name: &str) -> Value {
        self.data()
            .and_then(|data| data.get(name))
            .cloned()
            .unwrap_or_else(empty_text)
    }

    /// Queue message body: the text as received, or compact JSON for payloads
    /// that did not arrive as text.
    pub fn message_body(&self) -> Result<String, PipelineError> {
        match &self.source_text {
            Some(text) => Ok(text.clone()),
            None => Ok(serde_json::to_string(&self.payload)?),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, PipelineError> {
        Ok(to_pretty_string(&self.payload)?)
    }
}

/// Data returned by the lead lookup service. Empty when the lookup missed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupResult {
    fields: JsonObject,
}

impl LookupResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Accepts only JSON objects; any other shape is not a usable lookup.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Value {
        self.fields.get(name).cloned().unwrap_or_else(empty_text)
    }

    pub fn lead_email(&self) -> Value {
        self.field("lead_email")
    }

    pub fn lead_owner(&self) -> Value {
        self.field("lead_owner")
    }

    pub fn funnel(&self) -> Value {
        self.field("funnel")
    }
}

/// Lead event payload with the lookup data attached under `lookup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnrichedRecord {
    fields: JsonObject,
}

impl EnrichedRecord {
    /// Merges the lookup into the event payload. A `lookup` key already present
    /// in the payload keeps its position and takes the new value; otherwise the
    /// key is appended. Payloads that are not objects contribute no fields.
    pub fn merge(event: &LeadEvent, lookup: LookupResult) -> Self {
        let mut fields = event.payload().as_object().cloned().unwrap_or_default();
        fields.insert(LOOKUP_FIELD.to_string(), Value::Object(lookup.fields));
        Self { fields }
    }

    pub fn to_pretty_json(&self) -> Result<String, PipelineError> {
        Ok(to_pretty_string(self)?)
    }
}

fn empty_text() -> Value {
    Value::String(String::new())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_event() -> LeadEvent {
        LeadEvent::from_value(json!({
            "event": {
                "lead_id": "lead_42",
                "data": {
                    "display_name": "Jane Doe",
                    "date_created": "2026-10-01T08:30:00Z",
                    "status_label": "Potential"
                }
            },
            "subscription_id": "sub_1"
        }))
    }

    #[test]
    fn resolves_string_lead_id() {
        assert_eq!(sample_event().lead_id().as_deref(), Some("lead_42"));
    }

    #[test]
    fn numeric_lead_id_is_rendered_as_text() {
        let event = LeadEvent::from_value(json!({"event": {"lead_id": 42}}));
        assert_eq!(event.lead_id().as_deref(), Some("42"));
    }

    #[test]
    fn missing_or_blank_lead_id_is_rejected() {
        for payload in [
            json!({}),
            json!({"event": {}}),
            json!({"event": {"lead_id": ""}}),
            json!({"event": {"lead_id": null}}),
            json!({"event": {"lead_id": {"id": 1}}}),
            json!({"event": "lead_42"}),
            json!(["lead_42"]),
        ] {
            let event = LeadEvent::from_value(payload);
            assert_eq!(event.require_lead_id(), Err(PipelineError::MissingLeadId));
        }
    }

    #[test]
    fn malformed_body_is_invalid_json() {
        let error = LeadEvent::from_json_str("{\"event\":").expect_err("truncated body");
        assert!(matches!(error, PipelineError::InvalidJson(_)));
    }

    #[test]
    fn data_fields_default_to_empty_text() {
        let event = sample_event();
        assert_eq!(event.data_field("display_name"), json!("Jane Doe"));
        assert_eq!(event.data_field("lead_source"), json!(""));

        let bare = LeadEvent::from_value(json!({"event": {"lead_id": "1"}}));
        assert_eq!(bare.data_field("display_name"), json!(""));
    }

    #[test]
    fn message_body_forwards_received_text_unchanged() {
        let body = "{ \"event\": {\"lead_id\": \"42\"},\n  \"a\": 1 }";
        let event = LeadEvent::from_json_str(body).expect("valid body");
        assert_eq!(event.message_body().expect("body"), body);
    }

    #[test]
    fn message_body_for_object_payload_preserves_field_order() {
        let event = LeadEvent::from_value(json!({
            "event": {"lead_id": "42", "data": {"display_name": "Jane"}},
            "a": 1
        }));
        assert_eq!(
            event.message_body().expect("body"),
            "{\"event\":{\"lead_id\":\"42\",\"data\":{\"display_name\":\"Jane\"}},\"a\":1}"
        );
    }

    #[test]
    fn merge_appends_lookup_after_event_fields() {
        let lookup = LookupResult::from_value(json!({
            "lead_email": "jane@example.com",
            "lead_owner": "Sam",
            "funnel": "Inbound"
        }))
        .expect("object lookup");

        let record = EnrichedRecord::merge(&sample_event(), lookup);
        let value = serde_json::to_value(&record).expect("serializes");
        let keys: Vec<&String> = value.as_object().expect("object").keys().collect();

        assert_eq!(keys, vec!["event", "subscription_id", "lookup"]);
        assert_eq!(value["lookup"]["lead_owner"], json!("Sam"));
        assert_eq!(value["event"], sample_event().payload()["event"]);
    }

    #[test]
    fn merge_with_empty_lookup_writes_empty_object() {
        let record = EnrichedRecord::merge(&sample_event(), LookupResult::empty());
        let value = serde_json::to_value(&record).expect("serializes");
        assert_eq!(value["lookup"], json!({}));
    }

    #[test]
    fn merge_replaces_existing_lookup_key() {
        let event = LeadEvent::from_value(json!({
            "event": {"lead_id": "1"},
            "lookup": {"stale": true}
        }));
        let record = EnrichedRecord::merge(&event, LookupResult::empty());
        let pretty = record.to_pretty_json().expect("serializes");

        assert_eq!(pretty.matches("\"lookup\"").count(), 1);
        assert!(!pretty.contains("stale"));
    }

    #[test]
    fn merge_keeps_existing_lookup_key_in_place() {
        let event = LeadEvent::from_value(json!({
            "lookup": {"stale": true},
            "event": {"lead_id": "1"},
            "subscription_id": "sub_1"
        }));
        let lookup = LookupResult::from_value(json!({"lead_owner": "Sam"})).expect("object lookup");

        let value = serde_json::to_value(EnrichedRecord::merge(&event, lookup)).expect("serializes");
        let keys: Vec<&String> = value.as_object().expect("object").keys().collect();

        assert_eq!(keys, vec!["lookup", "event", "subscription_id"]);
        assert_eq!(value["lookup"], json!({"lead_owner": "Sam"}));
    }

    #[test]
    fn large_and_decimal_numbers_keep_their_source_text() {
        let body = "{\"event\":{\"lead_id\":123456789012345678901234,\"data\":{\"score\":123456789012345678901234,\"ratio\":1.10}}}";
        let event = LeadEvent::from_json_str(body).expect("valid body");

        assert_eq!(event.lead_id().as_deref(), Some("123456789012345678901234"));

        let raw = event.to_pretty_json().expect("serializes");
        assert!(raw.contains("\"score\": 123456789012345678901234"));
        assert!(raw.contains("\"ratio\": 1.10"));

        let enriched = EnrichedRecord::merge(&event, LookupResult::empty())
            .to_pretty_json()
            .expect("serializes");
        assert!(enriched.contains("\"score\": 123456789012345678901234"));
        assert!(enriched.contains("\"ratio\": 1.10"));
    }

    #[test]
    fn lookup_rejects_non_object_values() {
        assert!(LookupResult::from_value(json!(["a"])).is_none());
        assert!(LookupResult::from_value(json!("owner")).is_none());
        assert!(LookupResult::from_value(json!({})).expect("object").is_empty());
    }
}
