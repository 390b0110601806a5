use super::blocking::block_on_current;

pub trait MessageQueue {
    fn send_message(&self, body: &str) -> Result<(), String>;
}

/// SQS queue addressed by its URL.
#[derive(Debug, Clone)]
pub struct SqsMessageQueue {
    queue_url: String,
    sqs_client: aws_sdk_sqs::Client,
}

impl SqsMessageQueue {
    pub fn new(queue_url: impl Into<String>, sqs_client: aws_sdk_sqs::Client) -> Self {
        Self {
            queue_url: queue_url.into(),
            sqs_client,
        }
    }
}

impl MessageQueue for SqsMessageQueue {
    fn send_message(&self, body: &str) -> Result<(), String> {
        let request = self
            .sqs_client
            .send_message()
            .queue_url(self.queue_url.clone())
            .message_body(body);

        block_on_current(async move {
            request
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to enqueue lead event: {error}"))
        })
    }
}
