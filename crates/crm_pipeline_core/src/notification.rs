use serde::Serialize;
use serde_json::Value;

use crate::contract::{LeadEvent, LookupResult};
use crate::error::PipelineError;
use crate::json_format::to_pretty_string;

pub const ALERT_MARKER: &str = "🔔";
/// SNS requires subjects shorter than 100 characters.
pub const MAX_SUBJECT_CHARS: usize = 99;

/// Summary published for every enriched lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationMessage {
    #[serde(rename = "New Lead Alert")]
    pub alert: String,
    #[serde(rename = "Name")]
    pub name: Value,
    #[serde(rename = "Lead ID")]
    pub lead_id: String,
    #[serde(rename = "Created Date")]
    pub created_date: Value,
    #[serde(rename = "Label")]
    pub label: Value,
    #[serde(rename = "Email")]
    pub email: Value,
    #[serde(rename = "Lead Owner")]
    pub lead_owner: Value,
    #[serde(rename = "Funnel")]
    pub funnel: Value,
}

impl NotificationMessage {
    pub fn build(event: &LeadEvent, lead_id: &str, lookup: &LookupResult) -> Self {
        Self {
            alert: ALERT_MARKER.to_string(),
            name: event.data_field("display_name"),
            lead_id: lead_id.to_string(),
            created_date: event.data_field("date_created"),
            label: event.data_field("status_label"),
            email: lookup.lead_email(),
            lead_owner: lookup.lead_owner(),
            funnel: lookup.funnel(),
        }
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    /// `New Lead: <name> (<lead_id>)`, with line breaks and control characters
    /// blanked and the result capped at the broker's subject length.
    pub fn subject(&self) -> String {
        let raw = format!("New Lead: {} ({})", self.display_name(), self.lead_id);
        raw.chars()
            .map(|ch| if breaks_subject_line(ch) { ' ' } else { ch })
            .take(MAX_SUBJECT_CHARS)
            .collect()
    }

    pub fn to_pretty_json(&self) -> Result<String, PipelineError> {
        Ok(to_pretty_string(self)?)
    }
}

fn breaks_subject_line(ch: char) -> bool {
    ch.is_control() || matches!(ch, '\u{2028}' | '\u{2029}')
}
