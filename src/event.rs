//! Event model and classification for the redirect service.
//!
//! The service can be invoked with two event shapes: an API gateway style
//! proxy request, or a CloudFront origin-response event carrying the
//! in-flight response. The shapes are modelled as an explicit tagged union
//! so that classification happens exactly once, at deserialization time.
//! The API shape is tried first; a (theoretical) event carrying both shapes
//! therefore classifies as an API request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status code with which CloudFront signals an oversized origin response.
pub const OVERSIZED_STATUS: &str = "413";

/// An inbound event, in one of the two supported shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RedirectEvent {
    /// An API gateway style proxy request.
    Api(ApiRequest),
    /// A CloudFront origin-response event.
    CloudFront(CloudFrontEvent),
}

impl RedirectEvent {
    /// Classify the event. Pure function of the event contents.
    pub fn classification(&self) -> Classification {
        match self {
            RedirectEvent::Api(_) => Classification::Api,
            RedirectEvent::CloudFront(event) if event.is_oversized() => {
                Classification::EdgeOversized
            }
            RedirectEvent::CloudFront(_) => Classification::EdgePassthrough,
        }
    }
}

/// The three ways an inbound event can be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// API gateway request; derive method and key from the request itself.
    Api,
    /// CloudFront event whose carried response is an oversized error;
    /// replace it with a redirect to a signed url.
    EdgeOversized,
    /// CloudFront event with any other response; return it untouched.
    EdgePassthrough,
}

/// An API gateway proxy request, reduced to the fields the service reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    /// HTTP verb of the inbound request.
    pub http_method: String,
    /// Path parameters captured by the gateway route.
    pub path_parameters: PathParameters,
}

impl ApiRequest {
    /// The object store key for this request: the full wildcard segment,
    /// passed through byte for byte.
    pub fn object_key(&self) -> &str {
        &self.path_parameters.proxy
    }
}

/// Path parameters of an API gateway proxy route.
#[derive(Debug, Clone, Deserialize)]
pub struct PathParameters {
    /// The full wildcard path after the route prefix.
    pub proxy: String,
}

/// A CloudFront origin-response event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudFrontEvent {
    /// Event records; CloudFront sends exactly one.
    pub records: Vec<CloudFrontRecord>,
}

impl CloudFrontEvent {
    fn is_oversized(&self) -> bool {
        self.records
            .first()
            .map(|record| record.cf.response.status == OVERSIZED_STATUS)
            .unwrap_or(false)
    }

    /// Split the event into its request and response halves.
    pub fn into_parts(mut self) -> Option<(CloudFrontRequest, CloudFrontResponse)> {
        if self.records.is_empty() {
            return None;
        }
        let record = self.records.swap_remove(0);
        Some((record.cf.request, record.cf.response))
    }
}

/// A single CloudFront event record.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudFrontRecord {
    /// The CloudFront payload of the record.
    pub cf: CloudFrontPayload,
}

/// The `cf` payload of a CloudFront origin-response record.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudFrontPayload {
    /// The in-flight request.
    pub request: CloudFrontRequest,
    /// The in-flight response from the origin.
    pub response: CloudFrontResponse,
}

/// The in-flight CloudFront request.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudFrontRequest {
    /// HTTP verb of the viewer request.
    pub method: String,
    /// Request uri, including the stage prefix.
    pub uri: String,
}

impl CloudFrontRequest {
    /// Derive the object store key from the request uri: strip the leading
    /// `/<stage>` segment, then the remaining leading slash.
    pub fn object_key<'a>(&'a self, stage: &str) -> &'a str {
        let prefix = format!("/{stage}");
        let trimmed = self.uri.strip_prefix(&prefix).unwrap_or(&self.uri);
        trimmed.strip_prefix('/').unwrap_or(trimmed)
    }
}

/// The in-flight CloudFront response.
///
/// Only `status` and `headers` are ever touched; all other fields are
/// captured verbatim so a passthrough response serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFrontResponse {
    /// Response status code, as a string per the CloudFront event format.
    pub status: String,
    /// Response headers in the CloudFront array-of-pairs format.
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<CloudFrontHeader>>,
    /// Any remaining response fields, preserved as-is.
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

/// A single header entry in the CloudFront header format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFrontHeader {
    /// Canonical header name.
    pub key: String,
    /// Header value.
    pub value: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn api_event() -> Value {
        json!({
            "httpMethod": "GET",
            "pathParameters": { "proxy": "foo/bar.txt" }
        })
    }

    fn cloudfront_event(status: &str) -> Value {
        json!({
            "Records": [{
                "cf": {
                    "request": { "method": "GET", "uri": "/prod/images/a.png" },
                    "response": {
                        "status": status,
                        "statusDescription": "Request Entity Too Large",
                        "headers": {
                            "content-type": [{ "key": "Content-Type", "value": "text/plain" }]
                        }
                    }
                }
            }]
        })
    }

    #[test]
    fn classifies_api_request() {
        let event: RedirectEvent = serde_json::from_value(api_event()).unwrap();

        assert_eq!(event.classification(), Classification::Api);
    }

    #[test]
    fn classifies_oversized_response() {
        let event: RedirectEvent = serde_json::from_value(cloudfront_event("413")).unwrap();

        assert_eq!(event.classification(), Classification::EdgeOversized);
    }

    #[test]
    fn classifies_passthrough_response() {
        let event: RedirectEvent = serde_json::from_value(cloudfront_event("502")).unwrap();

        assert_eq!(event.classification(), Classification::EdgePassthrough);
    }

    #[test]
    fn classification_is_idempotent() {
        let event: RedirectEvent = serde_json::from_value(cloudfront_event("413")).unwrap();

        assert_eq!(event.classification(), event.classification());
    }

    #[test]
    fn rejects_malformed_event() {
        let result: std::result::Result<RedirectEvent, _> =
            serde_json::from_value(json!({ "path": "/foo" }));

        assert!(result.is_err());
    }

    #[test]
    fn api_key_is_the_proxy_parameter() {
        let event: ApiRequest = serde_json::from_value(api_event()).unwrap();

        assert_eq!(event.object_key(), "foo/bar.txt");
    }

    #[test]
    fn cloudfront_key_strips_stage_and_slash() {
        let request = CloudFrontRequest {
            method: "GET".to_owned(),
            uri: "/prod/images/a.png".to_owned(),
        };

        assert_eq!(request.object_key("prod"), "images/a.png");
    }

    #[test]
    fn cloudfront_key_without_stage_prefix() {
        let request = CloudFrontRequest {
            method: "PUT".to_owned(),
            uri: "/images/a.png".to_owned(),
        };

        assert_eq!(request.object_key("prod"), "images/a.png");
    }

    #[test]
    fn passthrough_response_roundtrips() {
        let raw = cloudfront_event("502");
        let event: CloudFrontEvent = serde_json::from_value(raw.clone()).unwrap();
        let (_, response) = event.into_parts().unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            raw["Records"][0]["cf"]["response"]
        );
    }
}
