#![allow(dead_code)]

use crm_pipeline_core::contract::LookupResult;
use crm_pipeline_lambda::config::{EnrichConfig, IngestConfig, LookupConfig};
use serde_json::{json, Value};

pub fn ingest_config() -> IngestConfig {
    IngestConfig {
        raw_bucket: "project-crm-raw".to_string(),
        raw_prefix: "crm/".to_string(),
        queue_url: "https://sqs.us-east-1.amazonaws.com/000000000000/crm-queue".to_string(),
    }
}

pub fn enrich_config() -> EnrichConfig {
    EnrichConfig {
        enriched_bucket: "project-crm-enriched".to_string(),
        enriched_prefix: "leads/".to_string(),
        topic_arn: "arn:aws:sns:us-east-1:000000000000:crm-notifications".to_string(),
        lookup: LookupConfig::default(),
    }
}

/// A webhook payload shaped like the CRM's `lead.created` event.
pub fn lead_payload(lead_id: &str, display_name: &str) -> Value {
    json!({
        "subscription_id": "whsub_5xVW",
        "event": {
            "id": format!("ev_{lead_id}"),
            "action": "created",
            "object_type": "lead",
            "lead_id": lead_id,
            "data": {
                "display_name": display_name,
                "date_created": "2026-10-18T09:15:00.000000+00:00",
                "status_label": "Potential",
                "custom": {"source": "webinar", "score": 87}
            }
        }
    })
}

pub fn direct_request(payload: &Value) -> Value {
    json!({ "body": payload.to_string() })
}

pub fn queued_batch(bodies: &[String]) -> Value {
    let records: Vec<Value> = bodies
        .iter()
        .enumerate()
        .map(|(index, body)| {
            json!({
                "messageId": format!("msg-{index}"),
                "eventSource": "aws:sqs",
                "body": body,
            })
        })
        .collect();
    json!({ "Records": records })
}

pub fn owner_lookup() -> LookupResult {
    LookupResult::from_value(json!({
        "lead_email": "jane.doe@example.com",
        "lead_owner": "Sam Carter",
        "funnel": "Inbound Demo"
    }))
    .expect("lookup fixture is an object")
}
