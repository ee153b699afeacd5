//! Upstream failure taxonomy.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::uri::InvalidUri;
use axum::http::StatusCode;

/// Why an upstream round trip did not produce a successful response.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The upstream answered with an error status. Carries what it sent.
    #[error("upstream returned {status}")]
    Status { status: StatusCode, body: Bytes },

    #[error("invalid upstream URI: {0}")]
    InvalidUri(#[from] InvalidUri),

    #[error("failed to build upstream request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("upstream request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    #[error("failed to read upstream response body: {0}")]
    Body(#[source] axum::Error),
}

impl UpstreamError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Status { .. } => "status",
            UpstreamError::InvalidUri(_) => "invalid_uri",
            UpstreamError::Request(_) => "request",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Body(_) => "body",
        }
    }

    /// The error followed by its chain of sources, `: `-separated.
    ///
    /// hyper's client errors are terse at the top level ("client error (Connect)");
    /// the useful part (e.g. "Connection refused") is further down the chain.
    pub fn describe(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let next = err.to_string();
            if !text.ends_with(&next) {
                text.push_str(": ");
                text.push_str(&next);
            }
            source = err.source();
        }
        text
    }
}
