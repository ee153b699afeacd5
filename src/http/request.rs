//! Inbound request classification.
//!
//! # Responsibilities
//! - Generate a unique request ID for tracing
//! - Decide which relay a method belongs to
//! - Work out how many body bytes the client declared

use axum::http::{header, HeaderMap, Method, Uri};
use uuid::Uuid;

/// Unique identifier attached to each request's tracing span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Which relay handles a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    /// Body-bearing methods: captured, then forwarded with their headers.
    Write,
    /// Bodyless methods: forwarded as-is.
    Read,
}

impl RelayKind {
    /// Classify a method; `None` means it is not proxied at all.
    pub fn for_method(method: &Method) -> Option<Self> {
        match *method {
            Method::POST | Method::PUT | Method::PATCH => Some(RelayKind::Write),
            Method::GET | Method::HEAD | Method::DELETE | Method::OPTIONS => Some(RelayKind::Read),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelayKind::Write => "write",
            RelayKind::Read => "read",
        }
    }
}

/// Body length declared by `Content-Length`.
///
/// Missing or malformed values count as zero: chunked request bodies are not
/// read.
pub fn declared_length(headers: &HeaderMap) -> usize {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

/// The request target as the client sent it (path and query).
pub fn request_target(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn classifies_methods() {
        assert_eq!(RelayKind::for_method(&Method::POST), Some(RelayKind::Write));
        assert_eq!(RelayKind::for_method(&Method::PUT), Some(RelayKind::Write));
        assert_eq!(RelayKind::for_method(&Method::PATCH), Some(RelayKind::Write));
        assert_eq!(RelayKind::for_method(&Method::GET), Some(RelayKind::Read));
        assert_eq!(RelayKind::for_method(&Method::HEAD), Some(RelayKind::Read));
        assert_eq!(RelayKind::for_method(&Method::DELETE), Some(RelayKind::Read));
        assert_eq!(RelayKind::for_method(&Method::TRACE), None);
        assert_eq!(RelayKind::for_method(&Method::CONNECT), None);
    }

    #[test]
    fn declared_length_defaults_to_zero() {
        let mut headers = HeaderMap::new();
        assert_eq!(declared_length(&headers), 0);

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("42"));
        assert_eq!(declared_length(&headers), 42);

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("forty"));
        assert_eq!(declared_length(&headers), 0);

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("-1"));
        assert_eq!(declared_length(&headers), 0);
    }

    #[test]
    fn target_keeps_query() {
        let uri: Uri = "/v1/messages?beta=true".parse().unwrap();
        assert_eq!(request_target(&uri), "/v1/messages?beta=true");

        let absolute: Uri = "http://localhost:9999/health".parse().unwrap();
        assert_eq!(request_target(&absolute), "/health");
    }

    #[test]
    fn request_ids_differ() {
        assert_ne!(RequestId::new(), RequestId::new());
    }
}
