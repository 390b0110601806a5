use crm_pipeline_core::contract::LeadEvent;
use crm_pipeline_core::error::{PipelineError, Stage};
use crm_pipeline_core::storage_keys::{raw_event_object_key, JSON_CONTENT_TYPE};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::adapters::object_store::ObjectStore;
use crate::adapters::queue::MessageQueue;
use crate::config::IngestConfig;
use crate::handlers::invocation::{classify_invocation, decode_body, Invocation};
use crate::handlers::response::ApiGatewayResponse;

const COMPONENT: &str = "ingest_handler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Stored { lead_id: String, raw_key: String },
    Skipped,
}

/// Entry point for the ingest Lambda.
///
/// Direct requests always produce a response; validation and downstream
/// failures become 400/500 responses. For queue batches the first failure
/// aborts the rest of the batch: a malformed or empty message is answered
/// with a 400 response so the batch is not redelivered, while a downstream
/// failure is returned as `Err` so the queue retries it. Records without a
/// `lead_id` are skipped.
pub fn handle_ingest_event(
    event: &Value,
    config: &IngestConfig,
    store: &impl ObjectStore,
    queue: &impl MessageQueue,
) -> Result<ApiGatewayResponse, PipelineError> {
    info!(component = COMPONENT, "✅️ Received event");

    match classify_invocation(event) {
        Invocation::Queued(records) => {
            let mut stored = 0usize;
            for record in &records {
                let outcome = decode_body(record.body).and_then(|lead_event| {
                    ingest_queued_event(&lead_event, config, store, queue)
                });
                match outcome {
                    Ok(IngestOutcome::Stored { .. }) => stored += 1,
                    Ok(IngestOutcome::Skipped) => {}
                    Err(failure) if failure.is_client_error() => {
                        error!(
                            component = COMPONENT,
                            message_id = record.message_id.unwrap_or_default(),
                            error = %failure,
                            "❌ Rejecting queued batch"
                        );
                        return Ok(ApiGatewayResponse::from_error(&failure, Stage::Ingest));
                    }
                    Err(failure) => {
                        error!(
                            component = COMPONENT,
                            message_id = record.message_id.unwrap_or_default(),
                            error = %failure,
                            "❌ Aborting queued batch"
                        );
                        return Err(failure);
                    }
                }
            }
            info!(
                component = COMPONENT,
                records = records.len(),
                stored,
                "✅️ Queued batch processed"
            );
            Ok(ApiGatewayResponse::processed(None))
        }
        Invocation::Direct(body) => {
            let outcome = decode_body(body).and_then(|lead_event| {
                info!(component = COMPONENT, "✅️ Payload parsed successfully");
                let lead_id = lead_event.require_lead_id()?;
                store_and_forward(&lead_event, &lead_id, config, store, queue)?;
                Ok(lead_id)
            });
            Ok(match outcome {
                Ok(lead_id) => ApiGatewayResponse::processed(Some(&lead_id)),
                Err(failure) => {
                    log_rejection(&failure);
                    ApiGatewayResponse::from_error(&failure, Stage::Ingest)
                }
            })
        }
    }
}

fn ingest_queued_event(
    lead_event: &LeadEvent,
    config: &IngestConfig,
    store: &impl ObjectStore,
    queue: &impl MessageQueue,
) -> Result<IngestOutcome, PipelineError> {
    let Some(lead_id) = lead_event.lead_id() else {
        warn!(component = COMPONENT, "❌ Missing lead_id in payload, skipping record");
        return Ok(IngestOutcome::Skipped);
    };

    let raw_key = store_and_forward(lead_event, &lead_id, config, store, queue)?;
    Ok(IngestOutcome::Stored { lead_id, raw_key })
}

/// Writes the raw record, then forwards the event to the enrichment queue.
///
/// The two steps are not transactional: if the send fails the raw record stays.
pub fn store_and_forward(
    lead_event: &LeadEvent,
    lead_id: &str,
    config: &IngestConfig,
    store: &impl ObjectStore,
    queue: &impl MessageQueue,
) -> Result<String, PipelineError> {
    let raw_key = raw_event_object_key(&config.raw_prefix, lead_id);
    info!(component = COMPONENT, lead_id, key = %raw_key, "📥 Writing raw lead event");

    let body = lead_event.to_pretty_json()?;
    store
        .put_object(&raw_key, body.as_bytes(), JSON_CONTENT_TYPE)
        .map_err(PipelineError::Unhandled)?;
    info!(component = COMPONENT, lead_id, "✅️ Successfully stored lead event");

    queue
        .send_message(&lead_event.message_body()?)
        .map_err(PipelineError::Unhandled)?;
    info!(component = COMPONENT, lead_id, "✅️ Event sent to queue");

    Ok(raw_key)
}

fn log_rejection(failure: &PipelineError) {
    match failure {
        PipelineError::Unhandled(_) => {
            error!(component = COMPONENT, error = %failure, "❌ Unhandled exception occurred")
        }
        PipelineError::InvalidJson(_) => {
            error!(component = COMPONENT, error = %failure, "❌ Invalid JSON in request body")
        }
        PipelineError::MissingBody => {
            warn!(component = COMPONENT, "❌ Missing body in request")
        }
        PipelineError::MissingLeadId => {
            warn!(component = COMPONENT, "❌ Missing lead_id in payload")
        }
    }
}
