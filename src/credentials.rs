//! Temporary credential acquisition for the edge variant.
//!
//! The edge variant never signs with its own execution identity; every
//! invocation assumes the configured role first and signs with the
//! returned session credentials. There is deliberately no caching: one
//! AssumeRole call per invocation keeps the session name tied to the
//! invocation request id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{RedirectError, Result};

/// Trait implemented by identity providers that exchange a long-lived
/// identity for short-lived, scoped credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Obtain temporary credentials under the given session name.
    ///
    /// A single attempt is made; failures propagate to the caller.
    async fn assume(&self, session_name: &str) -> Result<SessionCredentials>;
}

/// Temporary security credentials returned by a role assumption.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCredentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: String,
    expires_at: DateTime<Utc>,
}

impl SessionCredentials {
    /// Create a new set of session credentials.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
            expires_at,
        }
    }

    /// The access key id of the session.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// The time at which the session expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Convert into credentials usable by an AWS SDK client.
    pub fn sdk_credentials(&self) -> aws_credential_types::Credentials {
        aws_credential_types::Credentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            Some(self.session_token.clone()),
            Some(self.expires_at.into()),
            "AssumeRole",
        )
    }
}

/// `CredentialProvider` backed by the STS AssumeRole API.
pub struct StsCredentialProvider {
    client: aws_sdk_sts::Client,
    role_arn: String,
}

impl StsCredentialProvider {
    /// Create a new provider assuming the given role.
    pub fn new(client: aws_sdk_sts::Client, role_arn: impl Into<String>) -> Self {
        Self {
            client,
            role_arn: role_arn.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StsCredentialProvider {
    async fn assume(&self, session_name: &str) -> Result<SessionCredentials> {
        debug!(role_arn = %self.role_arn, session_name, "assuming role");
        let output = self
            .client
            .assume_role()
            .role_arn(&self.role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| RedirectError::credentials_denied(e.to_string()))?;

        let credentials = output.credentials().ok_or_else(|| {
            RedirectError::credentials_denied("assume-role response carried no credentials")
        })?;

        let expiration = credentials.expiration();
        let expires_at = DateTime::from_timestamp(expiration.secs(), expiration.subsec_nanos())
            .ok_or_else(|| {
                RedirectError::credentials_denied("assume-role expiration out of range")
            })?;

        Ok(SessionCredentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            credentials.session_token(),
            expires_at,
        ))
    }
}
