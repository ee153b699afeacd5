//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! accepted connection
//!     → server.rs (Axum router, accept loop)
//!     → relay.rs (dispatch by method, write or read relay)
//!     → request.rs (request ID, declared body length, target)
//!     → [upstream client round trip]
//!     → response.rs (rebuild or synthesize the client response)
//!     → Send to client
//! ```

pub mod relay;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RelayKind, RequestId};
pub use server::{AppState, HttpServer};
