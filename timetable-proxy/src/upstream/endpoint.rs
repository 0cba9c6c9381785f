//! Upstream endpoint catalogue.

use super::credential::Credential;

const SUBWAY_BASE_URL: &str = "https://openapi.kric.go.kr/openapi/trainUseInfo/subwayTimetable";

const INTERCITY_BASE_URL: &str =
    "https://apis.data.go.kr/1613000/TrainInfoService/getStrtpntAlocFndTrainInfo";

/// Downstream caching directive attached to successful responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Shared-cache freshness lifetime in seconds
    pub s_maxage: u32,
    /// Window in seconds during which a stale entry may be served while revalidating
    pub stale_while_revalidate: u32,
}

impl CachePolicy {
    pub const fn new(s_maxage: u32, stale_while_revalidate: u32) -> Self {
        Self {
            s_maxage,
            stale_while_revalidate,
        }
    }

    /// The `Cache-Control` header value.
    pub fn header_value(&self) -> String {
        format!(
            "s-maxage={}, stale-while-revalidate={}",
            self.s_maxage, self.stale_while_revalidate
        )
    }
}

/// One proxied upstream API: where it lives, how it is authenticated and
/// how its responses may be cached downstream.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Short name used in logs
    pub name: &'static str,
    /// Base URL (no query string)
    pub base_url: String,
    /// Environment variable the credential is read from
    pub credential_var: &'static str,
    /// Configured credential, if any
    pub credential: Option<Credential>,
    pub cache: CachePolicy,
}

impl Endpoint {
    /// Subway station timetable (KRIC open API).
    pub fn subway(credential: Option<Credential>) -> Self {
        Self {
            name: "subway",
            base_url: SUBWAY_BASE_URL.to_string(),
            credential_var: "KRIC_KEY",
            credential,
            cache: CachePolicy::new(60, 300),
        }
    }

    /// Intercity train journey lookup (TAGO open API).
    pub fn intercity(credential: Option<Credential>) -> Self {
        Self {
            name: "intercity",
            base_url: INTERCITY_BASE_URL.to_string(),
            credential_var: "TAGO_KEY",
            credential,
            cache: CachePolicy::new(120, 600),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}
