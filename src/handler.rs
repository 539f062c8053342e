//! Redirect handlers for both deployment variants.
//!
//! Each invocation is a single linear pass: classify the event, optionally
//! assume the configured role, derive method and key, sign, and shape the
//! response. Nothing is retried and no state survives an invocation.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::credentials::CredentialProvider;
use crate::error::{RedirectError, Result};
use crate::event::{ApiRequest, CloudFrontResponse, RedirectEvent, OVERSIZED_STATUS};
use crate::response::{cloudfront_redirect, ApiResponse};
use crate::signer::factory::SignerFactory;
use crate::signer::{Operation, UrlSigner};

/// State of the direct redirect variant: a single url signer backed by the
/// ambient execution identity.
#[derive(Clone)]
pub struct RedirectState {
    signer: Arc<dyn UrlSigner>,
}

impl RedirectState {
    /// Create a new direct redirect state.
    pub fn new(signer: Arc<dyn UrlSigner>) -> Self {
        Self { signer }
    }

    /// Handle an API gateway request: redirect GET and PUT to a signed url,
    /// answer anything else with a bare 405.
    pub async fn handle(&self, request: ApiRequest) -> Result<ApiResponse> {
        let operation = match Operation::from_method(&request.http_method) {
            Ok(operation) => operation,
            Err(err) => {
                debug!(%err, "answering 405");
                return Ok(ApiResponse::method_not_allowed());
            }
        };

        let signed = self.signer.sign(request.object_key(), operation).await?;
        info!(key = %request.object_key(), ?operation, "redirecting to signed url");
        Ok(ApiResponse::redirect(signed.url()))
    }
}

/// State of the edge redirect variant.
///
/// Credentials are acquired per invocation, so the signer is built per
/// invocation from the session credentials.
#[derive(Clone)]
pub struct EdgeState {
    credentials: Arc<dyn CredentialProvider>,
    signers: Arc<dyn SignerFactory>,
    stage: String,
}

/// Response of the edge variant: either an API gateway response or the
/// (possibly mutated) carried CloudFront response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EdgeOutcome {
    /// API gateway style response.
    Api(ApiResponse),
    /// CloudFront response, redirected or passed through.
    CloudFront(CloudFrontResponse),
}

impl EdgeState {
    /// Create a new edge redirect state.
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        signers: Arc<dyn SignerFactory>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            signers,
            stage: stage.into(),
        }
    }

    /// Handle an inbound event.
    ///
    /// API gateway requests and oversized-error CloudFront responses are
    /// redirected to a signed url; any other CloudFront response passes
    /// through untouched, without any external call. The `request_id`
    /// becomes the role session name, keeping sessions auditable and
    /// non-colliding.
    pub async fn handle(&self, event: RedirectEvent, request_id: &str) -> Result<EdgeOutcome> {
        debug!(classification = ?event.classification(), "handling edge event");

        match event {
            RedirectEvent::Api(request) => {
                let operation = Operation::from_method(&request.http_method)?;
                let signer = self.session_signer(request_id).await?;
                let signed = signer.sign(request.object_key(), operation).await?;
                info!(key = %request.object_key(), ?operation, "redirecting to signed url");
                Ok(EdgeOutcome::Api(ApiResponse::redirect(signed.url())))
            }
            RedirectEvent::CloudFront(event) => {
                let (request, response) = event.into_parts().ok_or_else(|| {
                    RedirectError::malformed_event("CloudFront event carried no records")
                })?;

                if response.status != OVERSIZED_STATUS {
                    debug!(status = %response.status, "passing response through");
                    return Ok(EdgeOutcome::CloudFront(response));
                }

                let operation = Operation::from_method(&request.method)?;
                let key = request.object_key(&self.stage).to_owned();
                let signer = self.session_signer(request_id).await?;
                let signed = signer.sign(&key, operation).await?;
                info!(key = %key, ?operation, "redirecting oversized response to signed url");
                Ok(EdgeOutcome::CloudFront(cloudfront_redirect(
                    response,
                    signed.url(),
                )))
            }
        }
    }

    async fn session_signer(&self, request_id: &str) -> Result<Arc<dyn UrlSigner>> {
        let session = self.credentials.assume(request_id).await?;
        Ok(self.signers.signer(&session))
    }
}
