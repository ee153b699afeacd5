//! Upstream client subsystem.
//!
//! # Data Flow
//! ```text
//! relay (method, path+query, headers, body)
//!     → client.rs (base_url + path, single HTTP/1.1 round trip)
//!     → full response body buffered in memory
//!     → 2xx:     UpstreamResponse
//!       non-2xx: UpstreamError::Status (carries status and body)
//!       anything else: transport-level UpstreamError
//! ```
//!
//! # Design Decisions
//! - No retries and no caching
//! - No timeout unless one is configured
//! - Responses are never streamed through

pub mod client;
pub mod error;

pub use client::{UpstreamClient, UpstreamResponse};
pub use error::UpstreamError;
