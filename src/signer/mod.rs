//! Traits and types for creating pre-signed urls.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{RedirectError, Result};

pub mod factory;
pub mod s3;

/// Trait implemented by object store clients to derive a pre-signed url
/// for a single object and operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// Create a presigned url for an object store key.
    async fn sign(&self, key: &str, operation: Operation) -> Result<SignedUrl>;
}

/// The object store operation a signed url grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read a single object (getObject).
    Get,
    /// Write a single object (putObject).
    Put,
}

impl Operation {
    /// Map an HTTP verb to a signing operation. Verbs other than GET and
    /// PUT are rejected; no verb is silently treated as a write.
    pub fn from_method(method: &str) -> Result<Self> {
        match method {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            other => Err(RedirectError::unsupported_method(format!(
                "no object operation for method `{other}`"
            ))),
        }
    }
}

/// A presigned url with a validity period.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedUrl {
    url: String,
    valid_from: DateTime<Utc>,
    valid_duration: Duration,
}

impl SignedUrl {
    pub(crate) fn new(url: String, valid_from: DateTime<Utc>, valid_duration: Duration) -> Self {
        Self {
            url,
            valid_from,
            valid_duration,
        }
    }

    /// Get the presigned url.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the time the presigned url expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.valid_from + self.valid_duration
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::RedirectErrorKind;

    #[test]
    fn get_maps_to_read() {
        assert_eq!(Operation::from_method("GET").unwrap(), Operation::Get);
    }

    #[test]
    fn put_maps_to_write() {
        assert_eq!(Operation::from_method("PUT").unwrap(), Operation::Put);
    }

    #[test]
    fn other_verbs_are_rejected() {
        for method in ["POST", "DELETE", "HEAD", "OPTIONS", "PATCH"] {
            let err = Operation::from_method(method).unwrap_err();
            assert_eq!(err.kind(), RedirectErrorKind::UnsupportedMethod);
        }
    }

    #[test]
    fn signed_url_expiry() {
        let valid_from = Utc::now();
        let signed = SignedUrl::new(
            "https://my-bucket.s3.eu-west-1.amazonaws.com/key?sig".to_owned(),
            valid_from,
            Duration::from_secs(900),
        );

        assert_eq!(signed.expires_at(), valid_from + Duration::from_secs(900));
    }
}
