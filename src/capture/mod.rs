//! Request capture subsystem.
//!
//! # Data Flow
//! ```text
//! raw write-request body
//!     → serde_json parse
//!         ok  → summary.rs (bounded console summary)
//!             → log.rs (one JSONL line: timestamp, path, body)
//!         err → diagnostic with a bounded raw prefix, nothing persisted
//! ```
//!
//! # Design Decisions
//! - Capture only observes: the forwarded bytes are never touched
//! - No capture failure is allowed to stop the request from being forwarded

pub mod log;
pub mod summary;

pub use log::{CaptureError, CaptureLog, CapturedRequest};
pub use summary::{ConversationSummary, SummaryLimits};

use crate::config::CaptureConfig;
use crate::observability::metrics;

const SEPARATOR: &str = "============================================================";

/// What happened to a write-request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Parsed and appended to the capture log.
    Captured,
    /// Not a JSON document; nothing persisted.
    Unparseable,
    /// Parsed, but the append failed.
    WriteFailed,
}

impl CaptureOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureOutcome::Captured => "captured",
            CaptureOutcome::Unparseable => "unparseable",
            CaptureOutcome::WriteFailed => "write_failed",
        }
    }
}

/// Parses write-request bodies, prints their summary and persists them.
#[derive(Debug)]
pub struct RequestCapture {
    log: CaptureLog,
    limits: SummaryLimits,
    raw_preview_chars: usize,
}

impl RequestCapture {
    /// Open the capture log named in the configuration.
    pub fn open(config: &CaptureConfig) -> Result<Self, CaptureError> {
        Ok(Self::new(CaptureLog::open(&config.path)?, config))
    }

    pub fn new(log: CaptureLog, config: &CaptureConfig) -> Self {
        Self {
            log,
            limits: SummaryLimits::from(config),
            raw_preview_chars: config.raw_preview_chars,
        }
    }

    /// Inspect one request body.
    ///
    /// Appends exactly one record when `raw` parses as JSON and none otherwise.
    pub fn inspect(&self, method: &str, target: &str, raw: &[u8]) -> CaptureOutcome {
        let outcome = match serde_json::from_slice::<serde_json::Value>(raw) {
            Ok(document) => {
                let record = CapturedRequest::now(target, document);
                let summary = ConversationSummary::from_document(&record.body, &self.limits);
                tracing::info!(
                    model = %summary.model,
                    messages = summary.messages.len(),
                    "\n{}\n[{}] {} {}\n{}",
                    SEPARATOR,
                    record.timestamp,
                    method,
                    target,
                    summary
                );

                match self.log.append(&record) {
                    Ok(()) => CaptureOutcome::Captured,
                    Err(e) => {
                        tracing::error!(
                            path = %self.log.path().display(),
                            error = %e,
                            "Failed to write capture record"
                        );
                        CaptureOutcome::WriteFailed
                    }
                }
            }
            Err(e) => {
                let raw = String::from_utf8_lossy(raw);
                let (prefix, _) = summary::preview(&raw, self.raw_preview_chars);
                tracing::warn!(
                    method = %method,
                    path = %target,
                    error = %e,
                    "Failed to parse JSON body\nRaw body: {}",
                    prefix
                );
                CaptureOutcome::Unparseable
            }
        };

        metrics::record_capture(outcome.as_str());
        outcome
    }

    /// Location of the capture log.
    pub fn log_path(&self) -> &std::path::Path {
        self.log.path()
    }
}
