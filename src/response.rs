//! Outbound response shaping for both event shapes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::event::{CloudFrontHeader, CloudFrontResponse};

const REDIRECT_STATUS: u16 = 307;
const METHOD_NOT_ALLOWED_STATUS: u16 = 405;

/// An API gateway style response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Response headers, omitted entirely when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl ApiResponse {
    /// A 307 redirect pointing at the signed url.
    pub fn redirect(url: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Location".to_owned(), url.into());
        Self {
            status_code: REDIRECT_STATUS,
            headers: Some(headers),
        }
    }

    /// A bare 405, with no headers and no body.
    pub fn method_not_allowed() -> Self {
        Self {
            status_code: METHOD_NOT_ALLOWED_STATUS,
            headers: None,
        }
    }
}

/// Turn a carried CloudFront response into a redirect to the signed url.
///
/// Only the status and the `location` header are touched; everything else
/// the origin response carried is preserved.
pub fn cloudfront_redirect(mut response: CloudFrontResponse, url: impl Into<String>) -> CloudFrontResponse {
    response.status = REDIRECT_STATUS.to_string();
    response.headers.insert(
        "location".to_owned(),
        vec![CloudFrontHeader {
            key: "Location".to_owned(),
            value: url.into(),
        }],
    );
    response
}
