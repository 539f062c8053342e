//! # S3 Redirect
//!
//! S3 Redirect provides the building blocks for a small redirect service
//! that offloads bulk upload and download traffic from a compute layer
//! onto direct object store access. An inbound request for an object path
//! is answered with an HTTP 307 redirect to a time-limited presigned S3
//! url, so the bytes never flow through the service itself.
//!
//! Two deployment variants are provided as Lambda binaries:
//!
//! - `direct`: invoked through an API gateway proxy route; signs with the
//!   ambient execution identity and answers unsupported methods with 405.
//! - `edge`: additionally accepts CloudFront origin-response events. When
//!   the origin signals an oversized response (413) the carried response
//!   is rewritten into a redirect; anything else passes through untouched.
//!   The edge variant always assumes a configured role before signing.
//!
//! ## Design
//!
//! In order to stay testable, the crate is built around three seams:
//!
//! - `RedirectEvent`: a tagged union of the supported event shapes, so
//!   classification happens once, at deserialization time.
//! - `CredentialProvider`: exchanges the execution identity for
//!   short-lived session credentials (one AssumeRole per invocation).
//! - `UrlSigner`: derives a presigned url for a single object and
//!   operation.

#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod event;
pub mod handler;
pub mod response;
pub mod signer;

pub mod error;
