//! Successful proxy responses.

use axum::{
    Json,
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::classify::ClassifiedBody;
use crate::upstream::CachePolicy;

/// Outbound content type for XML passthrough.
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// A classified upstream body together with its downstream cache policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub body: ClassifiedBody,
    pub cache: CachePolicy,
}

impl ProxyReply {
    pub fn new(body: ClassifiedBody, cache: CachePolicy) -> Self {
        Self { body, cache }
    }
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        let cache_control = [(header::CACHE_CONTROL, self.cache.header_value())];

        match self.body {
            ClassifiedBody::Xml(xml) => (
                cache_control,
                [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
                xml,
            )
                .into_response(),
            ClassifiedBody::Json(value) => (cache_control, Json(value)).into_response(),
            ClassifiedBody::Raw(text) => (cache_control, Json(json!({ "raw": text }))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    use super::*;

    async fn render(body: ClassifiedBody) -> (StatusCode, String, String, String) {
        let response = ProxyReply::new(body, CachePolicy::new(60, 300)).into_response();
        let status = response.status();
        let get_header = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        let content_type = get_header(header::CONTENT_TYPE);
        let cache_control = get_header(header::CACHE_CONTROL);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (
            status,
            content_type,
            cache_control,
            String::from_utf8(bytes.to_vec()).unwrap(),
        )
    }

    #[tokio::test]
    async fn xml_reply() {
        let (status, content_type, cache, body) =
            render(ClassifiedBody::Xml("<root/>".into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, XML_CONTENT_TYPE);
        assert_eq!(cache, "s-maxage=60, stale-while-revalidate=300");
        assert_eq!(body, "<root/>");
    }

    #[tokio::test]
    async fn json_reply() {
        let (status, content_type, cache, body) =
            render(ClassifiedBody::Json(json!({"a": 1}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(cache, "s-maxage=60, stale-while-revalidate=300");
        assert_eq!(body, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn raw_reply_is_wrapped() {
        let (status, content_type, _, body) =
            render(ClassifiedBody::Raw("not json".into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value, json!({ "raw": "not json" }));
    }
}
