//! Metrics collection and exposition.
//!
//! # Metrics
//! - `capture_proxy_requests_total` (counter): requests by method, status, relay
//! - `capture_proxy_request_duration_seconds` (histogram): full round trip latency
//! - `capture_proxy_captures_total` (counter): capture outcomes
//! - `capture_proxy_upstream_errors_total` (counter): upstream failures by kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, relay: &'static str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("relay", relay.to_string()),
    ];
    metrics::counter!("capture_proxy_requests_total", &labels).increment(1);
    metrics::histogram!("capture_proxy_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of inspecting a write-request body.
pub fn record_capture(outcome: &'static str) {
    metrics::counter!("capture_proxy_captures_total", "outcome" => outcome).increment(1);
}

/// Record an upstream failure.
pub fn record_upstream_error(kind: &'static str) {
    metrics::counter!("capture_proxy_upstream_errors_total", "kind" => kind).increment(1);
}
