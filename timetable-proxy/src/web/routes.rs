//! HTTP route handlers.
//!
//! Each timetable handler runs the same pipeline: validate the query,
//! check the endpoint credential, build the upstream URL, dispatch once,
//! and classify the body. Any stage may short-circuit with a
//! [`ProxyError`].

use axum::{
    Router,
    extract::{RawQuery, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::classify::classify;
use crate::timetable::{IntercityTimetableRequest, QueryParams, SubwayTimetableRequest};
use crate::upstream::{Endpoint, UpstreamError, UpstreamUrl};

use super::error::{ProxyError, panic_response};
use super::reply::ProxyReply;
use super::state::AppState;

/// Request headers a browser front-end may send on a cross-origin call.
const ALLOWED_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, \
    Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/subwayTimetable", any(subway_timetable))
        .route("/api/korailTimetable", any(intercity_timetable))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,OPTIONS"),
        ))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_header(name: HeaderName, value: HeaderValue) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, value)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> ProxyError {
    ProxyError::NotFound
}

/// Subway station timetable.
async fn subway_timetable(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    if let Some(preflight) = check_method(&method)? {
        return Ok(preflight);
    }

    let params = QueryParams::parse(query.as_deref());
    let request = SubwayTimetableRequest::from_params(&params)?;

    relay(&state, &state.subway, &request.upstream_params()).await
}

/// Intercity journey timetable between two named stations.
async fn intercity_timetable(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    if let Some(preflight) = check_method(&method)? {
        return Ok(preflight);
    }

    let params = QueryParams::parse(query.as_deref());
    let request = IntercityTimetableRequest::from_params(&params, &state.stations)?;

    relay(&state, &state.intercity, &request.upstream_params()).await
}

/// Accept GET, answer OPTIONS preflights directly, reject everything else.
fn check_method(method: &Method) -> Result<Option<Response>, ProxyError> {
    match *method {
        Method::GET => Ok(None),
        Method::OPTIONS => Ok(Some(StatusCode::OK.into_response())),
        _ => Err(ProxyError::MethodNotAllowed),
    }
}

/// Forward validated parameters to `endpoint` and classify the answer.
async fn relay(
    state: &AppState,
    endpoint: &Endpoint,
    params: &[(&'static str, String)],
) -> Result<Response, ProxyError> {
    let credential = endpoint
        .credential
        .as_ref()
        .ok_or(ProxyError::Configuration {
            var: endpoint.credential_var,
        })?;

    let url = UpstreamUrl::build(&endpoint.base_url, params, credential);

    let response = state.client.fetch(&url).await.map_err(|e| match e {
        // Upstreams sometimes echo the request back in error bodies
        UpstreamError::Status { status, detail } => UpstreamError::Status {
            status,
            detail: credential.redact(&detail),
        },
        other => other,
    })?;

    let body = classify(response);
    debug!(
        endpoint = endpoint.name,
        body = body.kind(),
        "relayed upstream response"
    );

    Ok(ProxyReply::new(body, endpoint.cache).into_response())
}
