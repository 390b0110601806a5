use crm_pipeline_core::contract::{EnrichedRecord, LeadEvent};
use crm_pipeline_core::error::{PipelineError, Stage};
use crm_pipeline_core::notification::NotificationMessage;
use crm_pipeline_core::storage_keys::{enriched_object_key, JSON_CONTENT_TYPE};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::adapters::lookup::LeadLookup;
use crate::adapters::notifier::Notifier;
use crate::adapters::object_store::ObjectStore;
use crate::config::EnrichConfig;
use crate::handlers::invocation::{classify_invocation, decode_body, Invocation};
use crate::handlers::response::ApiGatewayResponse;

const COMPONENT: &str = "enrich_handler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichOutcome {
    Enriched {
        lead_id: String,
        enriched_key: String,
        lookup_found: bool,
    },
    Skipped,
}

/// Adapters the enrichment stage talks to.
pub struct EnrichDependencies<'a, S, L, N> {
    pub config: &'a EnrichConfig,
    pub store: &'a S,
    pub lookup: &'a L,
    pub notifier: &'a N,
}

impl<'a, S, L, N> EnrichDependencies<'a, S, L, N>
where
    S: ObjectStore,
    L: LeadLookup,
    N: Notifier,
{
    pub fn new(config: &'a EnrichConfig, store: &'a S, lookup: &'a L, notifier: &'a N) -> Self {
        Self {
            config,
            store,
            lookup,
            notifier,
        }
    }
}

/// Entry point for the enrichment Lambda.
///
/// Mirrors the ingest dispatch: direct requests always get a response. A
/// failure inside a queue batch aborts the remaining records; malformed
/// messages end in a 400 response and downstream failures are returned as
/// `Err` for redelivery.
pub fn handle_enrich_event<S, L, N>(
    event: &Value,
    deps: &EnrichDependencies<'_, S, L, N>,
) -> Result<ApiGatewayResponse, PipelineError>
where
    S: ObjectStore,
    L: LeadLookup,
    N: Notifier,
{
    info!(component = COMPONENT, "✅️ Received event for enrichment + notification");

    match classify_invocation(event) {
        Invocation::Queued(records) => {
            let mut enriched = 0usize;
            for record in &records {
                let outcome =
                    decode_body(record.body).and_then(|lead_event| enrich_lead_event(&lead_event, deps));
                match outcome {
                    Ok(EnrichOutcome::Enriched { .. }) => enriched += 1,
                    Ok(EnrichOutcome::Skipped) => {}
                    Err(failure) if failure.is_client_error() => {
                        error!(
                            component = COMPONENT,
                            message_id = record.message_id.unwrap_or_default(),
                            error = %failure,
                            "❌ Rejecting queued batch"
                        );
                        return Ok(ApiGatewayResponse::from_error(&failure, Stage::Enrich));
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
                enriched,
                "✅️ Queued batch processed"
            );
            Ok(ApiGatewayResponse::processed(None))
        }
        Invocation::Direct(body) => {
            let outcome =
                decode_body(body).and_then(|lead_event| enrich_lead_event(&lead_event, deps));
            Ok(match outcome {
                Ok(EnrichOutcome::Enriched { lead_id, .. }) => {
                    ApiGatewayResponse::processed(Some(&lead_id))
                }
                Ok(EnrichOutcome::Skipped) => ApiGatewayResponse::processed(None),
                Err(failure) => {
                    match &failure {
                        PipelineError::Unhandled(_) => error!(
                            component = COMPONENT,
                            error = %failure,
                            "❌ Unhandled exception occurred"
                        ),
                        PipelineError::InvalidJson(_) => error!(
                            component = COMPONENT,
                            error = %failure,
                            "❌ Invalid JSON in request body"
                        ),
                        _ => warn!(component = COMPONENT, error = %failure, "❌ Request rejected"),
                    }
                    ApiGatewayResponse::from_error(&failure, Stage::Enrich)
                }
            })
        }
    }
}

/// Enriches one lead event: lookup, merge, store, notify.
///
/// Events without a `lead_id` are skipped. A lookup miss still produces an
/// enriched record (with an empty `lookup`) and a notification.
pub fn enrich_lead_event<S, L, N>(
    lead_event: &LeadEvent,
    deps: &EnrichDependencies<'_, S, L, N>,
) -> Result<EnrichOutcome, PipelineError>
where
    S: ObjectStore,
    L: LeadLookup,
    N: Notifier,
{
    let Some(lead_id) = lead_event.lead_id() else {
        warn!(component = COMPONENT, "❌ Missing lead_id in payload");
        return Ok(EnrichOutcome::Skipped);
    };

    let lookup = deps.lookup.fetch(&lead_id);
    let lookup_found = !lookup.is_empty();
    let notification = NotificationMessage::build(lead_event, &lead_id, &lookup);

    let enriched_key = enriched_object_key(&deps.config.enriched_prefix, &lead_id);
    let record = EnrichedRecord::merge(lead_event, lookup);
    deps.store
        .put_object(
            &enriched_key,
            record.to_pretty_json()?.as_bytes(),
            JSON_CONTENT_TYPE,
        )
        .map_err(PipelineError::Unhandled)?;
    info!(
        component = COMPONENT,
        lead_id = %lead_id,
        key = %enriched_key,
        lookup_found,
        "✅️ Stored enriched lead"
    );

    deps.notifier
        .publish(&notification.subject(), &notification.to_pretty_json()?)
        .map_err(PipelineError::Unhandled)?;
    info!(component = COMPONENT, lead_id = %lead_id, "✅️ Notification sent for lead");

    Ok(EnrichOutcome::Enriched {
        lead_id,
        enriched_key,
        lookup_found,
    })
}
