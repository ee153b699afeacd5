//! HTTP server setup and the accept loop.
//!
//! # Responsibilities
//! - Create the Axum Router with the dispatching fallback handler
//! - Wire up the optional access log layer
//! - Accept connections one at a time and serve each to completion
//! - Stop accepting once shutdown is signalled

use std::sync::Arc;

use axum::Router;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::capture::{CaptureError, RequestCapture};
use crate::config::ProxyConfig;
use crate::http::relay::dispatch;
use crate::net::{serve_connection, Listener};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub capture: Arc<RequestCapture>,
}

/// HTTP server for the capture proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server, opening the capture log named in `config`.
    pub fn new(config: ProxyConfig) -> Result<Self, CaptureError> {
        let capture = RequestCapture::open(&config.capture)?;
        Ok(Self::with_capture(config, capture))
    }

    /// Create a server around an already opened capture sink.
    pub fn with_capture(config: ProxyConfig, capture: RequestCapture) -> Self {
        let state = AppState {
            upstream: Arc::new(UpstreamClient::new(&config.upstream)),
            capture: Arc::new(capture),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router; every method and path lands in [`dispatch`].
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let router = Router::new().fallback(dispatch).with_state(state);

        if config.listener.access_log {
            router.layer(TraceLayer::new_for_http())
        } else {
            router
        }
    }

    /// Run the accept loop until `shutdown` fires.
    ///
    /// Each connection is served to completion before the next accept, so
    /// requests are forwarded and captured in arrival order. A shutdown that
    /// arrives mid-request takes effect after that request is answered.
    pub async fn run(self, listener: Listener, mut shutdown: broadcast::Receiver<()>) {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(address = %addr, "HTTP server starting");
        }

        loop {
            let accepted = tokio::select! {
                biased;
                _ = shutdown.recv() => break,
                accepted = listener.accept() => accepted,
            };

            match accepted {
                Ok((stream, peer)) => serve_connection(stream, peer, self.router.clone()).await,
                Err(e) => tracing::warn!(error = %e, "Accept failed"),
            }
        }

        tracing::info!("HTTP server stopped");
    }

    /// The request router, for driving the proxy without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
