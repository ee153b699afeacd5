//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the capture proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, access log toggle).
    pub listener: ListenerConfig,

    /// The upstream API every request is forwarded to.
    pub upstream: UpstreamConfig,

    /// Capture log location and console summary limits.
    pub capture: CaptureConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:9999").
    pub bind_address: String,

    /// Emit a tower-http trace span for every request.
    ///
    /// Off by default: the capture summary is the interesting output and
    /// per-request access lines only add noise.
    pub access_log: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:9999".to_string(),
            access_log: false,
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL; the inbound path and query are appended verbatim.
    pub base_url: String,

    /// Bound on the whole upstream round trip, in seconds.
    ///
    /// `None` waits forever, so an unresponsive upstream stalls the proxy.
    pub timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    /// Round trip timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:55447".to_string(),
            timeout_secs: None,
        }
    }
}

/// Capture log and console summary configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Newline-delimited JSON file, opened in append mode.
    pub path: PathBuf,

    /// Characters of plain-text message content shown in the summary.
    pub text_preview_chars: usize,

    /// Characters shown per content block.
    pub block_preview_chars: usize,

    /// Content blocks shown per message.
    pub max_blocks: usize,

    /// Characters of an unparseable body shown in the diagnostic.
    pub raw_preview_chars: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("captured_requests.jsonl"),
            text_preview_chars: 200,
            block_preview_chars: 100,
            max_blocks: 3,
            raw_preview_chars: 500,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_setup() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
        assert!(!config.listener.access_log);
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:55447");
        assert!(config.upstream.timeout().is_none());
        assert_eq!(config.capture.path, PathBuf::from("captured_requests.jsonl"));
        assert_eq!(config.capture.text_preview_chars, 200);
        assert_eq!(config.capture.block_preview_chars, 100);
        assert_eq!(config.capture.max_blocks, 3);
        assert_eq!(config.capture.raw_preview_chars, 500);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "http://10.0.0.5:8080"
            timeout_secs = 30

            [capture]
            max_blocks = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "http://10.0.0.5:8080");
        assert_eq!(config.upstream.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.capture.max_blocks, 5);
        assert_eq!(config.capture.text_preview_chars, 200);
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
    }
}
