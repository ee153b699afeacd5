//! Response handling and transformation.
//!
//! # Responsibilities
//! - Rebuild upstream responses for the client
//! - Drop encoding headers that no longer describe the buffered body
//! - Synthesize the proxy's own error responses
//!
//! # Design Decisions
//! - Upstream bodies are fully buffered, never streamed
//! - Synthesized errors are plain text with no extra headers

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;

use crate::upstream::UpstreamResponse;

/// Remove `Transfer-Encoding` and `Content-Encoding`.
pub fn strip_encoding_headers(headers: &mut HeaderMap) {
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONTENT_ENCODING);
}

/// Status, headers and body of an upstream response, unchanged.
pub fn relay(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = upstream.headers;
    response
}

/// Like [`relay`], minus the encoding headers.
pub fn relay_decoded(mut upstream: UpstreamResponse) -> Response {
    strip_encoding_headers(&mut upstream.headers);
    relay(upstream)
}

/// Status and body only; upstream headers are not carried over.
pub fn relay_status(status: StatusCode, body: Bytes) -> Response {
    plain(status, body)
}

/// The fixed 502 sent when the upstream could not be used.
pub fn proxy_error(detail: &str) -> Response {
    plain(StatusCode::BAD_GATEWAY, format!("Proxy error: {detail}"))
}

/// Sent for methods neither relay handles.
pub fn not_implemented(method: &str) -> Response {
    plain(
        StatusCode::NOT_IMPLEMENTED,
        format!("Unsupported method ({method})"),
    )
}

/// Sent when the declared request body could not be read.
pub fn bad_request(detail: &str) -> Response {
    plain(StatusCode::BAD_REQUEST, format!("Bad request: {detail}"))
}

fn plain(status: StatusCode, body: impl Into<Bytes>) -> Response {
    let mut response = Response::new(Body::from(body.into()));
    *response.status_mut() = status;
    response
}
