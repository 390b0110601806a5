use super::blocking::block_on_current;

pub trait Notifier {
    fn publish(&self, subject: &str, message: &str) -> Result<(), String>;
}

/// SNS topic publisher.
#[derive(Debug, Clone)]
pub struct SnsNotifier {
    topic_arn: String,
    sns_client: aws_sdk_sns::Client,
}

impl SnsNotifier {
    pub fn new(topic_arn: impl Into<String>, sns_client: aws_sdk_sns::Client) -> Self {
        Self {
            topic_arn: topic_arn.into(),
            sns_client,
        }
    }
}

impl Notifier for SnsNotifier {
    fn publish(&self, subject: &str, message: &str) -> Result<(), String> {
        let request = self
            .sns_client
            .publish()
            .topic_arn(self.topic_arn.clone())
            .subject(subject)
            .message(message);

        block_on_current(async move {
            request
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to publish lead notification: {error}"))
        })
    }
}
