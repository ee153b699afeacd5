//! Request relays.
//!
//! # Data Flow
//! ```text
//! dispatch (by method)
//!     → write relay: read declared body → capture → forward with headers
//!         ok (2xx)     → status + headers minus encodings + body
//!         status error → status + body
//!         other error  → 502
//!     → read relay: forward bare request
//!         ok (2xx)     → status + all headers + body
//!         any error    → 502
//!     → anything else: 501
//! ```

use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::response::Response;
use tracing::Instrument;

use crate::http::request::{declared_length, request_target, RelayKind, RequestId};
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::UpstreamError;

/// Single entry point for every inbound request.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let target = request_target(request.uri());
    let kind = RelayKind::for_method(&method);

    let span = tracing::info_span!(
        "request",
        request_id = %RequestId::new(),
        method = %method,
        path = %target,
    );

    let response = async {
        match kind {
            Some(RelayKind::Write) => relay_write(&state, request, &target).await,
            Some(RelayKind::Read) => relay_read(&state, request, &target).await,
            None => {
                tracing::warn!("Method not proxied");
                response::not_implemented(method.as_str())
            }
        }
    }
    .instrument(span)
    .await;

    metrics::record_request(
        method.as_str(),
        response.status().as_u16(),
        kind.map(|k| k.as_str()).unwrap_or("none"),
        start,
    );
    response
}

/// Capture the body, then forward it byte-for-byte with the inbound headers.
async fn relay_write(state: &AppState, request: Request<Body>, target: &str) -> Response {
    let (parts, body) = request.into_parts();

    let raw = match read_declared_body(body, declared_length(&parts.headers)).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read request body");
            return response::bad_request("incomplete request body");
        }
    };

    state.capture.inspect(parts.method.as_str(), target, &raw);

    match state
        .upstream
        .send(parts.method, target, parts.headers, raw)
        .await
    {
        Ok(upstream) => {
            tracing::debug!(status = %upstream.status, bytes = upstream.body.len(), "Upstream responded");
            response::relay_decoded(upstream)
        }
        Err(UpstreamError::Status { status, body }) => {
            tracing::info!(status = %status, "Relaying upstream error status");
            metrics::record_upstream_error("status");
            response::relay_status(status, body)
        }
        Err(e) => {
            let detail = e.describe();
            tracing::error!(error = %detail, "Upstream error");
            metrics::record_upstream_error(e.kind());
            response::proxy_error(&detail)
        }
    }
}

/// Forward a bodyless request and relay whatever comes back, headers untouched.
async fn relay_read(state: &AppState, request: Request<Body>, target: &str) -> Response {
    let method = request.method().clone();
    drop(request);

    match state
        .upstream
        .send(method, target, HeaderMap::new(), Bytes::new())
        .await
    {
        Ok(upstream) => response::relay(upstream),
        Err(e) => {
            let detail = e.describe();
            tracing::error!(error = %detail, "Upstream error");
            metrics::record_upstream_error(e.kind());
            response::proxy_error(&detail)
        }
    }
}

/// Read exactly `declared` bytes; zero means the body is not read at all.
async fn read_declared_body(body: Body, declared: usize) -> Result<Bytes, axum::Error> {
    if declared == 0 {
        return Ok(Bytes::new());
    }
    axum::body::to_bytes(body, declared).await
}
