//! Upstream response classification.
//!
//! Upstreams label their bodies inconsistently, so the declared content
//! type only decides between XML passthrough and a JSON parse attempt. A
//! body that fails to parse is still a successful response: it is carried
//! as raw text rather than failing the request.

use serde_json::Value;

use crate::upstream::UpstreamResponse;

/// Outbound body derived from a successful upstream response.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedBody {
    /// Opaque XML text, passed through verbatim
    Xml(String),
    /// Parsed JSON document
    Json(Value),
    /// Text that claimed to be JSON but did not parse
    Raw(String),
}

impl ClassifiedBody {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedBody::Xml(_) => "xml",
            ClassifiedBody::Json(_) => "json",
            ClassifiedBody::Raw(_) => "raw",
        }
    }
}

/// Whether a declared content type denotes XML (`application/xml`,
/// `text/xml`, `application/atom+xml`, ...).
pub fn is_xml(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("xml")
}

/// Classify a successful upstream response by its declared content type.
pub fn classify(response: UpstreamResponse) -> ClassifiedBody {
    if is_xml(&response.content_type) {
        return ClassifiedBody::Xml(response.body);
    }

    match serde_json::from_str::<Value>(&response.body) {
        Ok(value) => ClassifiedBody::Json(value),
        Err(_) => ClassifiedBody::Raw(response.body),
    }
}
