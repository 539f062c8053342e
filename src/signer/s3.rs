//! UrlSigner for S3 objects.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, Client};

use crate::error::{RedirectError, Result};

use super::{Operation, SignedUrl, UrlSigner};

/// Signs urls for a single S3 bucket with a fixed validity window.
pub struct S3UrlSigner {
    client: Client,
    bucket: String,
    url_ttl: Duration,
}

impl S3UrlSigner {
    /// Create a new `S3UrlSigner` from the provided S3 SDK client.
    pub fn new(client: Client, bucket: impl Into<String>, url_ttl: Duration) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            url_ttl,
        }
    }
}

#[async_trait]
impl UrlSigner for S3UrlSigner {
    async fn sign(&self, key: &str, operation: Operation) -> Result<SignedUrl> {
        let presign_config = PresigningConfig::expires_in(self.url_ttl)
            .map_err(|e| RedirectError::signing_failed(e.to_string()))?;
        let valid_from = presign_config.start_time();

        let request = match operation {
            Operation::Get => self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(key)
                .presigned(presign_config)
                .await
                .map_err(|e| RedirectError::signing_failed(e.to_string()))?,
            Operation::Put => self
                .client
                .put_object()
                .bucket(&self.bucket)
                .key(key)
                .presigned(presign_config)
                .await
                .map_err(|e| RedirectError::signing_failed(e.to_string()))?,
        };

        Ok(SignedUrl::new(
            request.uri().to_string(),
            valid_from.into(),
            self.url_ttl,
        ))
    }
}
