use crm_pipeline_lambda::adapters::object_store::S3ObjectStore;
use crm_pipeline_lambda::adapters::queue::SqsMessageQueue;
use crm_pipeline_lambda::config::IngestConfig;
use crm_pipeline_lambda::handlers::ingest::handle_ingest_event;
use crm_pipeline_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct RuntimeDependencies {
    config: IngestConfig,
    store: S3ObjectStore,
    queue: SqsMessageQueue,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<Value, Error> {
    let response = handle_ingest_event(&event.payload, &deps.config, &deps.store, &deps.queue)
        .map_err(|error| Error::from(format!("queued ingest batch failed: {error}")))?;

    serde_json::to_value(response)
        .map_err(|error| Error::from(format!("failed to serialize api response: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = IngestConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        store: S3ObjectStore::new(
            config.raw_bucket.clone(),
            aws_sdk_s3::Client::new(&aws_config),
        ),
        queue: SqsMessageQueue::new(
            config.queue_url.clone(),
            aws_sdk_sqs::Client::new(&aws_config),
        ),
        config,
    };

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
