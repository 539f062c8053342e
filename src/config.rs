//! Deployment configuration for both redirect variants.
//!
//! All settings are fixed at process start and read from the environment.
//! A missing required variable or an unparsable TTL is a startup error;
//! the process refuses to serve rather than signing urls with a guessed
//! configuration.

use std::env;
use std::time::Duration;

use crate::error::{RedirectError, Result};

const ENV_BUCKET: &str = "BUCKET";
const ENV_URL_TTL: &str = "URL_TTL_SECONDS";
const ENV_STAGE: &str = "STAGE_NAME";
const ENV_ROLE_ARN: &str = "ROLE_ARN";
const ENV_REGION: &str = "AWS_REGION";

const DEFAULT_URL_TTL: Duration = Duration::from_secs(900);

/// Configuration for the direct (API gateway only) variant.
#[derive(Debug, Clone)]
pub struct DirectConfig {
    bucket: String,
    url_ttl: Duration,
}

impl DirectConfig {
    /// Create a new `DirectConfig`.
    pub fn new(bucket: impl Into<String>, url_ttl: Duration) -> Self {
        Self {
            bucket: bucket.into(),
            url_ttl,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bucket: required(&lookup, ENV_BUCKET)?,
            url_ttl: url_ttl(&lookup)?,
        })
    }

    /// Target bucket for all signed urls.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Validity window of each signed url.
    pub fn url_ttl(&self) -> Duration {
        self.url_ttl
    }
}

/// Configuration for the edge (CloudFront capable) variant.
#[derive(Debug, Clone)]
pub struct EdgeConfig {
    bucket: String,
    url_ttl: Duration,
    stage: String,
    role_arn: String,
    region: String,
}

impl EdgeConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bucket: required(&lookup, ENV_BUCKET)?,
            url_ttl: url_ttl(&lookup)?,
            stage: required(&lookup, ENV_STAGE)?,
            role_arn: required(&lookup, ENV_ROLE_ARN)?,
            region: required(&lookup, ENV_REGION)?,
        })
    }

    /// Target bucket for all signed urls.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Validity window of each signed url.
    pub fn url_ttl(&self) -> Duration {
        self.url_ttl
    }

    /// Stage name stripped from CloudFront request uris.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Role assumed before signing.
    pub fn role_arn(&self) -> &str {
        &self.role_arn
    }

    /// Region used to construct the signing client.
    pub fn region(&self) -> &str {
        &self.region
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| RedirectError::config(format!("missing environment variable `{key}`")))
}

fn url_ttl<F>(lookup: &F) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(ENV_URL_TTL) {
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| RedirectError::config(format!("`{ENV_URL_TTL}` is not a valid number of seconds: `{raw}`"))),
        None => Ok(DEFAULT_URL_TTL),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::RedirectErrorKind;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn direct_config_with_defaults() {
        let config = DirectConfig::from_lookup(vars(&[("BUCKET", "my-bucket")])).unwrap();

        assert_eq!(config.bucket(), "my-bucket");
        assert_eq!(config.url_ttl(), Duration::from_secs(900));
    }

    #[test]
    fn direct_config_with_custom_ttl() {
        let config =
            DirectConfig::from_lookup(vars(&[("BUCKET", "my-bucket"), ("URL_TTL_SECONDS", "60")]))
                .unwrap();

        assert_eq!(config.url_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn direct_config_missing_bucket() {
        let err = DirectConfig::from_lookup(vars(&[])).unwrap_err();

        assert_eq!(err.kind(), RedirectErrorKind::Config);
    }

    #[test]
    fn direct_config_invalid_ttl() {
        let err =
            DirectConfig::from_lookup(vars(&[("BUCKET", "b"), ("URL_TTL_SECONDS", "soon")]))
                .unwrap_err();

        assert_eq!(err.kind(), RedirectErrorKind::Config);
    }

    #[test]
    fn edge_config_complete() {
        let config = EdgeConfig::from_lookup(vars(&[
            ("BUCKET", "my-bucket"),
            ("URL_TTL_SECONDS", "300"),
            ("STAGE_NAME", "prod"),
            ("ROLE_ARN", "arn:aws:iam::123456789012:role/redirect"),
            ("AWS_REGION", "eu-west-1"),
        ]))
        .unwrap();

        assert_eq!(config.bucket(), "my-bucket");
        assert_eq!(config.url_ttl(), Duration::from_secs(300));
        assert_eq!(config.stage(), "prod");
        assert_eq!(config.role_arn(), "arn:aws:iam::123456789012:role/redirect");
        assert_eq!(config.region(), "eu-west-1");
    }

    #[test]
    fn edge_config_missing_role() {
        let err = EdgeConfig::from_lookup(vars(&[
            ("BUCKET", "my-bucket"),
            ("STAGE_NAME", "prod"),
            ("AWS_REGION", "eu-west-1"),
        ]))
        .unwrap_err();

        assert_eq!(err.kind(), RedirectErrorKind::Config);
        assert!(err.message().contains("ROLE_ARN"));
    }
}
