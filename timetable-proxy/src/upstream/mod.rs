//! Upstream open-data API access.
//!
//! Covers everything between a validated request and an upstream body:
//! the credential and its one-time encoding, the endpoint catalogue,
//! URL assembly, and the bounded dispatcher.

mod client;
mod credential;
mod endpoint;
mod error;
mod target;

pub use client::{UpstreamClient, UpstreamConfig, UpstreamResponse};
pub use credential::{Credential, encode_once, is_percent_encoded};
pub use endpoint::{CachePolicy, Endpoint};
pub use error::{MAX_DETAIL_CHARS, UpstreamError};
pub use target::{CREDENTIAL_PARAM, UpstreamUrl};
