//! HTTP-facing error taxonomy.
//!
//! Every failure in the request pipeline ends up as a [`ProxyError`], and
//! this is the only place one is turned into a response, so all error
//! bodies share the `{ error, detail?, hint? }` shape.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use crate::timetable::ValidationError;
use crate::upstream::UpstreamError;

/// JSON body of every error response.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A failed proxy request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Credential for the endpoint is not set
    #[error("{var} is not configured on the server.")]
    Configuration { var: &'static str },

    /// Transport failure before a status line
    #[error("Server error")]
    Network(String),

    #[error("Gateway Timeout")]
    GatewayTimeout(String),

    /// Upstream answered with a non-2xx status
    #[error("Upstream {status}")]
    UpstreamStatus { status: u16, detail: String },

    #[error("Server error")]
    Unexpected(String),
}

impl ProxyError {
    /// Stable machine-readable name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::MethodNotAllowed => "method_not_allowed",
            ProxyError::NotFound => "not_found",
            ProxyError::Validation(ValidationError::MissingParams(_)) => "missing_params",
            ProxyError::Validation(ValidationError::UnknownStations(_)) => "unknown_station",
            ProxyError::Validation(ValidationError::InvalidDate(_)) => "invalid_date",
            ProxyError::Configuration { .. } => "missing_credential",
            ProxyError::Network(_) => "network",
            ProxyError::GatewayTimeout(_) => "gateway_timeout",
            ProxyError::UpstreamStatus { .. } => "upstream_status",
            ProxyError::Unexpected(_) => "unexpected",
        }
    }

    /// HTTP status of the error response.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The JSON error body.
    pub fn body(&self) -> ErrorBody {
        let detail = match self {
            ProxyError::Validation(e) => e.detail(),
            ProxyError::Network(detail)
            | ProxyError::GatewayTimeout(detail)
            | ProxyError::UpstreamStatus { detail, .. }
            | ProxyError::Unexpected(detail) => Some(detail.clone()),
            ProxyError::MethodNotAllowed
            | ProxyError::NotFound
            | ProxyError::Configuration { .. } => None,
        };
        let hint = match self {
            ProxyError::Configuration { var } => {
                Some(format!("Set {var} in the server environment."))
            }
            _ => None,
        };

        ErrorBody {
            error: self.to_string(),
            detail,
            hint,
        }
    }
}

impl From<UpstreamError> for ProxyError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Network(_) => ProxyError::Network(e.to_string()),
            UpstreamError::Timeout(_) => ProxyError::GatewayTimeout(e.to_string()),
            UpstreamError::Status { status, detail } => {
                ProxyError::UpstreamStatus { status, detail }
            }
            UpstreamError::Client(_) => ProxyError::Unexpected(e.to_string()),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        if status.is_server_error() {
            error!(status = status.as_u16(), kind = self.kind(), error = %body.error, detail = ?body.detail, "request failed");
        } else {
            warn!(status = status.as_u16(), kind = self.kind(), error = %body.error, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}

/// Render a handler panic as an unexpected error.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    error!(panic = %message, "handler panicked");

    ProxyError::Unexpected("internal error while handling the request".to_string())
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ProxyError::MethodNotAllowed.status(), 405);
        assert_eq!(ProxyError::NotFound.status(), 404);
        assert_eq!(
            ProxyError::Validation(ValidationError::MissingParams(vec!["stinCd"])).status(),
            400
        );
        assert_eq!(ProxyError::Configuration { var: "KRIC_KEY" }.status(), 500);
        assert_eq!(ProxyError::Network("x".into()).status(), 500);
        assert_eq!(ProxyError::GatewayTimeout("x".into()).status(), 504);
        assert_eq!(
            ProxyError::UpstreamStatus { status: 429, detail: String::new() }.status(),
            429
        );
        assert_eq!(ProxyError::Unexpected("x".into()).status(), 500);
    }

    #[test]
    fn missing_params_body() {
        let body = ProxyError::from(ValidationError::MissingParams(vec!["stinCd"])).body();
        assert_eq!(
            body,
            ErrorBody {
                error: "Missing params: stinCd".into(),
                detail: None,
                hint: None,
            }
        );
    }

    #[test]
    fn configuration_body_has_hint() {
        let body = ProxyError::Configuration { var: "KRIC_KEY" }.body();
        assert_eq!(body.error, "KRIC_KEY is not configured on the server.");
        assert_eq!(body.hint.as_deref(), Some("Set KRIC_KEY in the server environment."));
        assert!(body.detail.is_none());
    }

    #[test]
    fn upstream_errors_convert() {
        let err = ProxyError::from(UpstreamError::Status {
            status: 502,
            detail: "Bad Gateway".into(),
        });
        assert_eq!(err.status(), 502);
        assert_eq!(
            err.body(),
            ErrorBody {
                error: "Upstream 502".into(),
                detail: Some("Bad Gateway".into()),
                hint: None,
            }
        );

        let err = ProxyError::from(UpstreamError::Timeout(Duration::from_secs(10)));
        assert_eq!(err.kind(), "gateway_timeout");
        assert_eq!(err.body().error, "Gateway Timeout");
        assert_eq!(
            err.body().detail.as_deref(),
            Some("upstream did not respond within 10s")
        );

        let err = ProxyError::from(UpstreamError::Network("connection refused".into()));
        assert_eq!(err.kind(), "network");
        assert_eq!(err.body().error, "Server error");
        assert_eq!(
            err.body().detail.as_deref(),
            Some("Network error: connection refused")
        );

        let err = ProxyError::from(UpstreamError::Client("tls backend".into()));
        assert_eq!(err.kind(), "unexpected");
    }

    #[test]
    fn body_omits_empty_fields() {
        let json = serde_json::to_value(ProxyError::MethodNotAllowed.body()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Method Not Allowed" }));
    }

    #[test]
    fn nonsense_upstream_status_becomes_bad_gateway() {
        let err = ProxyError::UpstreamStatus {
            status: 42,
            detail: String::new(),
        };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn panic_is_unexpected_error() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
