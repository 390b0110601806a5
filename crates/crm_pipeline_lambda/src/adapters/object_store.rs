use aws_sdk_s3::primitives::ByteStream;

use super::blocking::block_on_current;

pub trait ObjectStore {
    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), String>;
}

/// S3-backed object store bound to a single bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(bucket: impl Into<String>, s3_client: aws_sdk_s3::Client) -> Self {
        Self {
            bucket: bucket.into(),
            s3_client,
        }
    }
}

impl ObjectStore for S3ObjectStore {
    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), String> {
        let request = self
            .s3_client
            .put_object()
            .bucket(self.bucket.clone())
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body.to_vec()));

        block_on_current(async move {
            request
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to write object to s3: {error}"))
        })
    }
}
