//! Upstream dispatch error types.

use std::error::Error as _;
use std::time::Duration;

/// Maximum number of characters of upstream body kept as diagnostic detail.
pub const MAX_DETAIL_CHARS: usize = 500;

/// Errors from a single outbound upstream call.
///
/// None of the variants carry the request URL, so they are safe to log and
/// to show to callers.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Transport failed before a status line was received
    #[error("Network error: {0}")]
    Network(String),

    /// No complete response within the timeout budget
    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    /// Upstream answered with a non-2xx status
    #[error("Upstream {status}")]
    Status { status: u16, detail: String },

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl UpstreamError {
    /// Classify a transport error from the HTTP client.
    pub(crate) fn from_transport(err: reqwest::Error, budget: Duration) -> Self {
        if err.is_timeout() {
            return UpstreamError::Timeout(budget);
        }
        UpstreamError::Network(describe(err.without_url()))
    }

    /// Build a status error, truncating the body to [`MAX_DETAIL_CHARS`].
    pub(crate) fn status(status: u16, body: &str) -> Self {
        UpstreamError::Status {
            status,
            detail: body.chars().take(MAX_DETAIL_CHARS).collect(),
        }
    }
}

/// Render an error with its source chain, e.g.
/// `error sending request: client error (Connect): Connection refused`.
fn describe(err: reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
