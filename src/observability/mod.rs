//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, capture summaries)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Console (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request and connection IDs are carried as span fields
//! - Metrics are cheap no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
