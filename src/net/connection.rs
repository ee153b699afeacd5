//! Serving a single accepted connection.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Drive one HTTP/1.1 exchange through the router to completion

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tower::ServiceExt;
use tracing::Instrument;

/// Global atomic counter for connection IDs.
/// Using relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Serve `stream` until its single request has been answered and the
/// connection is closed.
///
/// Protocol errors (client hung up, malformed request line) are logged and
/// swallowed; they never reach the accept loop.
pub async fn serve_connection(stream: TcpStream, peer: SocketAddr, router: Router) {
    let id = ConnectionId::new();
    let span = tracing::debug_span!("connection", connection_id = %id, peer_addr = %peer);

    async move {
        let service = service_fn(move |request: Request<Incoming>| router.clone().oneshot(request));

        if let Err(e) = http1::Builder::new()
            .keep_alive(false)
            .serve_connection(TokioIo::new(stream), service)
            .await
        {
            tracing::debug!(error = %e, "Connection ended with error");
        }
        tracing::trace!("Connection closed");
    }
    .instrument(span)
    .await
}
