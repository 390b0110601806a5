mod support;

use crm_pipeline_lambda::handlers::enrich::{handle_enrich_event, EnrichDependencies};
use crm_pipeline_lambda::handlers::ingest::handle_ingest_event;
use crm_pipeline_lambda::test_helpers::{
    RecordingNotifier, RecordingQueue, RecordingStore, StaticLookup,
};
use serde_json::{json, Value};

use support::{
    direct_request, enrich_config, ingest_config, lead_payload, owner_lookup, queued_batch,
};

#[test]
fn raw_record_round_trips_through_enrichment() {
    let raw_store = RecordingStore::new();
    let queue = RecordingQueue::new();
    let payload = lead_payload("lead_8fJk2", "Jane Doe");

    let response = handle_ingest_event(
        &direct_request(&payload),
        &ingest_config(),
        &raw_store,
        &queue,
    )
    .expect("direct ingest responds");
    assert_eq!(response.status_code, 200);

    let raw_text = raw_store
        .body_text("crm/crm_event_lead_8fJk2.json")
        .expect("raw record written");

    let enriched_store = RecordingStore::new();
    let lookup = StaticLookup::returning(owner_lookup());
    let notifier = RecordingNotifier::new();
    let config = enrich_config();
    let deps = EnrichDependencies::new(&config, &enriched_store, &lookup, &notifier);

    handle_enrich_event(&queued_batch(&[raw_text.clone()]), &deps).expect("batch succeeds");

    let enriched_text = enriched_store
        .body_text("leads/crm_enriched_lead_8fJk2.json")
        .expect("enriched record written");
    let raw: Value = serde_json::from_str(&raw_text).expect("raw json");
    let enriched: Value = serde_json::from_str(&enriched_text).expect("enriched json");

    let raw_fields = raw.as_object().expect("raw object");
    let enriched_fields = enriched.as_object().expect("enriched object");
    assert_eq!(enriched_fields.len(), raw_fields.len() + 1);
    for (key, value) in raw_fields {
        assert_eq!(
            serde_json::to_string_pretty(&enriched_fields[key]).expect("serializes"),
            serde_json::to_string_pretty(value).expect("serializes"),
            "field {key} changed during enrichment"
        );
    }
    assert!(enriched_text.starts_with(raw_text.trim_end_matches("\n}")));
    assert_eq!(enriched["lookup"]["funnel"], json!("Inbound Demo"));
}

#[test]
fn queued_message_drives_enrichment_end_to_end() {
    let raw_store = RecordingStore::new();
    let queue = RecordingQueue::new();
    let batch: Vec<String> = ["lead_1", "lead_2"]
        .iter()
        .map(|lead_id| lead_payload(lead_id, "Pat").to_string())
        .collect();

    handle_ingest_event(&queued_batch(&batch), &ingest_config(), &raw_store, &queue)
        .expect("ingest batch succeeds");
    assert_eq!(queue.messages(), batch);

    let enriched_store = RecordingStore::new();
    let lookup = StaticLookup::miss();
    let notifier = RecordingNotifier::new();
    let config = enrich_config();
    let deps = EnrichDependencies::new(&config, &enriched_store, &lookup, &notifier);

    handle_enrich_event(&queued_batch(&queue.messages()), &deps).expect("enrich batch succeeds");

    let mut keys = enriched_store.keys();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "leads/crm_enriched_lead_1.json".to_string(),
            "leads/crm_enriched_lead_2.json".to_string(),
        ]
    );

    let subjects: Vec<String> = notifier
        .published()
        .into_iter()
        .map(|notification| notification.subject)
        .collect();
    assert_eq!(
        subjects,
        vec!["New Lead: Pat (lead_1)".to_string(), "New Lead: Pat (lead_2)".to_string()]
    );

    for notification in notifier.published() {
        let message: Value = serde_json::from_str(&notification.message).expect("message json");
        assert_eq!(message["New Lead Alert"], json!("🔔"));
        assert_eq!(message["Email"], json!(""));
        assert_eq!(message["Lead Owner"], json!(""));
    }
}

#[test]
fn webhook_example_produces_documented_response() {
    let store = RecordingStore::new();
    let queue = RecordingQueue::new();
    let body = "{\"event\":{\"lead_id\":\"42\",\"data\":{\"display_name\":\"Jane\"}}}";

    let response = handle_ingest_event(&json!({ "body": body }), &ingest_config(), &store, &queue)
        .expect("direct ingest responds");

    assert_eq!(store.keys(), vec!["crm/crm_event_42.json".to_string()]);
    assert_eq!(queue.messages(), vec![body.to_string()]);
    assert_eq!(
        serde_json::to_string(&response).expect("serializes"),
        "{\"statusCode\":200,\"body\":\"{\\\"message\\\": \\\"✅️ Events processed\\\", \\\"lead_id\\\": \\\"42\\\"}\"}"
    );
}

#[test]
fn large_integers_survive_ingest_and_enrichment_unchanged() {
    let raw_store = RecordingStore::new();
    let queue = RecordingQueue::new();
    let body = "{\"event\":{\"lead_id\":\"77\",\"data\":{\"display_name\":\"Kim\",\"score\":123456789012345678901234,\"ratio\":1.10}}}";

    handle_ingest_event(&json!({ "body": body }), &ingest_config(), &raw_store, &queue)
        .expect("direct ingest responds");
    let raw_text = raw_store
        .body_text("crm/crm_event_77.json")
        .expect("raw record written");
    assert!(raw_text.contains("\"score\": 123456789012345678901234"));
    assert!(raw_text.contains("\"ratio\": 1.10"));

    let enriched_store = RecordingStore::new();
    let lookup = StaticLookup::miss();
    let notifier = RecordingNotifier::new();
    let config = enrich_config();
    let deps = EnrichDependencies::new(&config, &enriched_store, &lookup, &notifier);

    handle_enrich_event(&queued_batch(&queue.messages()), &deps).expect("enrich batch succeeds");

    let enriched_text = enriched_store
        .body_text("leads/crm_enriched_77.json")
        .expect("enriched record written");
    assert!(enriched_text.starts_with(raw_text.trim_end_matches("\n}")));
    assert!(enriched_text.contains("\"score\": 123456789012345678901234"));
}
