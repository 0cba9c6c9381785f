//! Bounded upstream dispatcher.
//!
//! Every call is a single GET with no retries. The whole exchange, from
//! issuing the request to reading the body, runs against one deadline;
//! expiry drops the in-flight request.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

use super::error::UpstreamError;
use super::target::UpstreamUrl;

/// Default timeout budget for an upstream call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `User-Agent` sent upstream. Some operators reject requests without one.
const DEFAULT_USER_AGENT: &str = concat!("timetable-proxy/", env!("CARGO_PKG_VERSION"));

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Wall-clock budget for one call
    pub timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl UpstreamConfig {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the timeout budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A successful (2xx) upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    /// Declared `Content-Type`, empty if absent
    pub content_type: String,
    pub body: String,
}

/// HTTP client for upstream open-data APIs.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a new client with the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            http,
            timeout: config.timeout,
        })
    }

    /// The timeout budget applied to each call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform one GET against `url`.
    ///
    /// Returns the response only for a 2xx status; anything else is an
    /// [`UpstreamError::Status`] carrying a truncated body.
    pub async fn fetch(&self, url: &UpstreamUrl) -> Result<UpstreamResponse, UpstreamError> {
        let started = Instant::now();
        let deadline = started + self.timeout;
        debug!(url = %url.redacted(), "dispatching upstream request");

        let response = match timeout_at(deadline, self.http.get(url.as_str()).send()).await {
            Err(_) => return Err(UpstreamError::Timeout(self.timeout)),
            Ok(Err(e)) => return Err(UpstreamError::from_transport(e, self.timeout)),
            Ok(Ok(response)) => response,
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = timeout_at(deadline, response.text()).await;

        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream responded"
        );

        if !status.is_success() {
            let body = match body {
                Ok(Ok(text)) => text,
                _ => String::new(),
            };
            return Err(UpstreamError::status(status.as_u16(), &body));
        }

        let body = match body {
            Err(_) => return Err(UpstreamError::Timeout(self.timeout)),
            Ok(Err(e)) => return Err(UpstreamError::from_transport(e, self.timeout)),
            Ok(Ok(text)) => text,
        };

        Ok(UpstreamResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
