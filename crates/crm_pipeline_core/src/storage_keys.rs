pub const RAW_EVENT_FILE_PREFIX: &str = "crm_event_";
pub const ENRICHED_FILE_PREFIX: &str = "crm_enriched_";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    RawEvent,
    Enriched,
}

impl RecordKind {
    fn file_prefix(self) -> &'static str {
        match self {
            Self::RawEvent => RAW_EVENT_FILE_PREFIX,
            Self::Enriched => ENRICHED_FILE_PREFIX,
        }
    }
}

/// Normalizes a configured prefix so that `crm`, `crm/` and `/crm/` all map to `crm/`.
pub fn normalize_prefix(base_prefix: &str) -> String {
    let trimmed = base_prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

pub fn record_object_key(base_prefix: &str, kind: RecordKind, lead_id: &str) -> String {
    format!(
        "{}{}{lead_id}.json",
        normalize_prefix(base_prefix),
        kind.file_prefix(),
    )
}

pub fn raw_event_object_key(base_prefix: &str, lead_id: &str) -> String {
    record_object_key(base_prefix, RecordKind::RawEvent, lead_id)
}

pub fn enriched_object_key(base_prefix: &str, lead_id: &str) -> String {
    record_object_key(base_prefix, RecordKind::Enriched, lead_id)
}
