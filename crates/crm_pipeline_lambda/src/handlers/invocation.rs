//! Shape detection shared by both handlers.
//!
//! An invocation is either a queue batch (`{"Records": [{"body": ...}, ...]}`)
//! or a single direct request (`{"body": ...}`), the way API Gateway proxy
//! integrations deliver it.

use crm_pipeline_core::contract::LeadEvent;
use crm_pipeline_core::error::PipelineError;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Invocation<'a> {
    Queued(Vec<QueuedRecord<'a>>),
    Direct(Option<&'a Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedRecord<'a> {
    pub message_id: Option<&'a str>,
    pub body: Option<&'a Value>,
}

/// Non-empty `Records` means a queue batch; anything else is a direct request.
pub fn classify_invocation(event: &Value) -> Invocation<'_> {
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .filter(|records| !records.is_empty());

    match records {
        Some(records) => Invocation::Queued(
            records
                .iter()
                .map(|record| QueuedRecord {
                    message_id: record.get("messageId").and_then(Value::as_str),
                    body: record.get("body"),
                })
                .collect(),
        ),
        None => Invocation::Direct(event.get("body")),
    }
}

/// Decodes a request or record body into a lead event.
///
/// Strings are parsed as JSON; an object body (non-proxy integrations) is used
/// as-is. A missing, null or empty body is [`PipelineError::MissingBody`].
pub fn decode_body(body: Option<&Value>) -> Result<LeadEvent, PipelineError> {
    match body {
        None | Some(Value::Null) => Err(PipelineError::MissingBody),
        Some(Value::String(text)) if text.is_empty() => Err(PipelineError::MissingBody),
        Some(Value::String(text)) => LeadEvent::from_json_str(text),
        Some(object @ Value::Object(_)) => Ok(LeadEvent::from_value(object.clone())),
        Some(other) => Err(PipelineError::InvalidJson(format!(
            "request body must be a JSON string or object, got {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
