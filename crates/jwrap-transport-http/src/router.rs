//! Axum router for the jwrap endpoint.
//! Routes: `GET|POST <path>` (endpoint), `GET /health` (liveness),
//! `GET /health/ready` (readiness).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use jwrap_dispatch::{DispatchSettings, Dispatcher, MethodRegistry};
use jwrap_protocol::{ParameterBag, ProtocolError, RawRequest, RenderedResponse};

use crate::gate::AccessPolicy;

/// Routes served by the health probes; the endpoint may not use them.
pub const PROBE_PATHS: [&str; 2] = ["/health", "/health/ready"];

/// Shared state threaded through all axum handlers.
pub struct AppState<T> {
    /// The object whose methods are exposed.
    pub target: Arc<T>,
    /// Its declared methods.
    pub registry: Arc<MethodRegistry<T>>,
    /// Dispatch behaviour.
    pub settings: Arc<DispatchSettings>,
    /// Access gate.
    pub access: AccessPolicy,
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
            registry: Arc::clone(&self.registry),
            settings: Arc::clone(&self.settings),
            access: self.access,
        }
    }
}

/// Builds the axum `Router`, mounting the endpoint at `path`.
pub fn build_router<T>(state: AppState<T>, path: &str) -> Router
where
    T: Send + Sync + 'static,
{
    Router::new()
        .route(path, get(handle_endpoint::<T>).post(handle_endpoint::<T>))
        .route(PROBE_PATHS[0], get(handle_health))
        .route(PROBE_PATHS[1], get(handle_ready))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "jwrap"}))
}

/// Readiness probe: returns `200 OK` once the server is accepting requests.
async fn handle_ready() -> impl IntoResponse {
    Json(json!({"status": "ready", "service": "jwrap"}))
}

async fn handle_endpoint<T>(
    State(state): State<AppState<T>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    T: Send + Sync + 'static,
{
    if let Err(refusal) = state.access.check() {
        tracing::warn!(reason = refusal, "request refused by access gate");
        return (StatusCode::FORBIDDEN, refusal).into_response();
    }

    let raw = RawRequest {
        query: lenient(
            "query",
            ParameterBag::from_urlencoded(query.as_deref().unwrap_or("")),
        ),
        body: lenient("body", parse_body(&headers, &body)),
    };

    // Target methods are synchronous and may block.
    let rendered = tokio::task::spawn_blocking(move || {
        Dispatcher::new(&*state.target, &state.registry, &state.settings).handle(raw)
    })
    .await;

    match rendered {
        Ok(Ok(out)) => render(out),
        Ok(Err(e)) => internal_error(&e.to_string()),
        Err(e) => internal_error(&format!("dispatch task failed: {e}")),
    }
}

/// Decodes the body as JSON or URL-encoded form according to its content type.
fn parse_body(headers: &HeaderMap, body: &[u8]) -> Result<ParameterBag, ProtocolError> {
    if body.is_empty() {
        return Ok(ParameterBag::new());
    }
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_media_type);
    if is_json {
        ParameterBag::from_json(body)
    } else {
        ParameterBag::from_urlencoded(&String::from_utf8_lossy(body))
    }
}

/// Media types compare case-insensitively; parameters such as `charset` are ignored.
fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}

/// Undecodable parameters count as absent, so binding reports what is missing.
fn lenient(source: &'static str, parsed: Result<ParameterBag, ProtocolError>) -> ParameterBag {
    parsed.unwrap_or_else(|e| {
        tracing::warn!(source, error = %e, "ignoring undecodable parameters");
        ParameterBag::new()
    })
}

fn render(out: RenderedResponse) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, out.content_type.as_mime())],
        out.body,
    )
        .into_response()
}

/// Last-resort failure when even the fault envelope cannot be produced.
fn internal_error(message: &str) -> Response {
    tracing::error!(error = message, "failed to render response");
    let body = json!({"success": false, "error": message, "code": "InternalError"});
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
