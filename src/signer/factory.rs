//! Construction of url signers from session credentials.

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;

use crate::credentials::SessionCredentials;

use super::s3::S3UrlSigner;
use super::UrlSigner;

/// Trait for building a url signer scoped to a set of session credentials.
///
/// The edge variant obtains fresh credentials per invocation, so the signer
/// itself is also built per invocation.
#[cfg_attr(test, mockall::automock)]
pub trait SignerFactory: Send + Sync {
    /// Build a signer that signs with the given credentials.
    fn signer(&self, credentials: &SessionCredentials) -> Arc<dyn UrlSigner>;
}

/// `SignerFactory` producing [`S3UrlSigner`]s for a fixed bucket, region
/// and validity window.
#[derive(Debug, Clone)]
pub struct S3SignerFactory {
    bucket: String,
    url_ttl: Duration,
    region: String,
}

impl S3SignerFactory {
    /// Create a new factory.
    pub fn new(bucket: impl Into<String>, url_ttl: Duration, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            url_ttl,
            region: region.into(),
        }
    }
}

impl SignerFactory for S3SignerFactory {
    fn signer(&self, credentials: &SessionCredentials) -> Arc<dyn UrlSigner> {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(credentials.sdk_credentials())
            .build();
        Arc::new(S3UrlSigner::new(
            Client::from_conf(config),
            self.bucket.clone(),
            self.url_ttl,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::signer::Operation;
    use chrono::Utc;

    #[tokio::test]
    async fn built_signer_uses_the_session_credentials() {
        let factory = S3SignerFactory::new("my-bucket", Duration::from_secs(900), "eu-west-1");
        let session = SessionCredentials::new(
            "ASIATEMPKEYID",
            "tempsecret",
            "temptoken",
            Utc::now() + Duration::from_secs(3600),
        );

        let signer = factory.signer(&session);
        let signed = signer.sign("foo/bar.txt", Operation::Get).await.unwrap();

        assert!(signed.url().contains("my-bucket"));
        assert!(signed.url().contains("foo/bar.txt"));
        assert!(signed.url().contains("ASIATEMPKEYID"));
        assert!(signed.url().contains("X-Amz-Security-Token="));
    }
}
