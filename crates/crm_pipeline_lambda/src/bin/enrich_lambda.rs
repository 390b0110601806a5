use crm_pipeline_lambda::adapters::lookup::HttpLeadLookup;
use crm_pipeline_lambda::adapters::notifier::SnsNotifier;
use crm_pipeline_lambda::adapters::object_store::S3ObjectStore;
use crm_pipeline_lambda::config::EnrichConfig;
use crm_pipeline_lambda::handlers::enrich::{handle_enrich_event, EnrichDependencies};
use crm_pipeline_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct RuntimeDependencies {
    config: EnrichConfig,
    store: S3ObjectStore,
    lookup: HttpLeadLookup,
    notifier: SnsNotifier,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    runtime: &RuntimeDependencies,
) -> Result<Value, Error> {
    let deps = EnrichDependencies::new(
        &runtime.config,
        &runtime.store,
        &runtime.lookup,
        &runtime.notifier,
    );
    let response = handle_enrich_event(&event.payload, &deps)
        .map_err(|error| Error::from(format!("queued enrichment batch failed: {error}")))?;

    serde_json::to_value(response)
        .map_err(|error| Error::from(format!("failed to serialize api response: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = EnrichConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let lookup = HttpLeadLookup::new(config.lookup.url_template.clone(), config.lookup.timeout)?;
    let runtime = RuntimeDependencies {
        store: S3ObjectStore::new(
            config.enriched_bucket.clone(),
            aws_sdk_s3::Client::new(&aws_config),
        ),
        lookup,
        notifier: SnsNotifier::new(
            config.topic_arn.clone(),
            aws_sdk_sns::Client::new(&aws_config),
        ),
        config,
    };

    let runtime = &runtime;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, runtime).await
    }))
    .await
}
