use crate::domain::ports::RawArchive;
use crate::utils::error::{Result, StatsError};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use serde_json::Value;

/// Raw-response archive backed by an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Archive {
    client: S3Client,
    bucket: String,
}

impl S3Archive {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl RawArchive for S3Archive {
    async fn put_json(&self, key: &str, body: &Value) -> Result<()> {
        let data = serde_json::to_vec(body)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(data.into())
            .content_type("application/json; charset=utf-8")
            .send()
            .await
            .map_err(|e| StatsError::ArchiveError {
                message: format!("failed to write {} to S3: {}", key, e),
            })?;

        tracing::debug!(key, bucket = %self.bucket, "archived raw response");
        Ok(())
    }
}
