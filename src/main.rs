//! Capture Proxy
//!
//! Sits between a client and an upstream HTTP API, forwards every request
//! unchanged and appends each JSON write-request body to a JSONL capture log.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                ┌──────────────────────────────────────────────┐
//!     ─────────────────────▶│  net listener (one connection at a time)     │
//!                           │      │                                       │
//!                           │      ▼                                       │
//!                           │  http dispatch ──▶ write relay ──▶ capture ──┼──▶ captured_requests.jsonl
//!                           │      │                 │                     │
//!                           │      └──▶ read relay   │                     │
//!                           │              │         ▼                     │
//!     ◀─────────────────────│◀─────────────┴──── upstream client ◀─────────┼──── Upstream API
//!                           └──────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```text
//! capture-proxy --upstream http://127.0.0.1:55447
//! export ANTHROPIC_BASE_URL=http://127.0.0.1:9999
//! ```

use std::path::PathBuf;

use clap::Parser;

use capture_proxy::config::{load_config, validate_config, ConfigError, ProxyConfig};
use capture_proxy::lifecycle::{signals, Shutdown};
use capture_proxy::net::Listener;
use capture_proxy::observability::{logging, metrics};
use capture_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "capture-proxy", version)]
#[command(about = "Forward HTTP traffic to an upstream API and capture request bodies", long_about = None)]
struct Cli {
    /// TOML configuration file; every setting has a default.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Local address to listen on (e.g. 127.0.0.1:9999).
    #[arg(short, long)]
    listen: Option<String>,

    /// Upstream base URL requests are forwarded to.
    #[arg(short, long)]
    upstream: Option<String>,

    /// JSONL file captured requests are appended to.
    #[arg(long)]
    capture_file: Option<PathBuf>,

    /// Give up on the upstream after this many seconds (default: wait forever).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log one line per request in addition to the capture summaries.
    #[arg(long)]
    access_log: bool,

    /// Log level (overridden by RUST_LOG).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut ProxyConfig) {
        if let Some(listen) = self.listen {
            config.listener.bind_address = listen;
        }
        if let Some(upstream) = self.upstream {
            config.upstream.base_url = upstream;
        }
        if let Some(path) = self.capture_file {
            config.capture.path = path;
        }
        if self.timeout_secs.is_some() {
            config.upstream.timeout_secs = self.timeout_secs;
        }
        if self.access_log {
            config.listener.access_log = true;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cli = Cli::parse();

    let mut config = match cli.config.take() {
        Some(path) => load_config(&path)?,
        None => ProxyConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability.log_level)?;

    let listener = Listener::bind(&config.listener).await?;
    let local_addr = listener.local_addr()?;

    if config.observability.metrics_enabled {
        // Validated above.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let server = HttpServer::new(config)?;
    let config = server.config();
    tracing::info!(
        address = %local_addr,
        upstream = %config.upstream.base_url,
        capture_file = %config.capture.path.display(),
        timeout_secs = ?config.upstream.timeout_secs,
        "Capture proxy starting"
    );
    tracing::info!("To use: export ANTHROPIC_BASE_URL=http://{}", local_addr);
    if config.upstream.timeout_secs.is_none() {
        tracing::warn!("No upstream timeout configured; a hung upstream stalls the proxy");
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::join!(
        server.run(listener, server_shutdown),
        signals::shutdown_on_interrupt(&shutdown),
    );

    tracing::info!("Shutting down...");
    Ok(())
}
