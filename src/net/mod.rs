//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, accept one connection)
//!     → connection.rs (serve exactly one HTTP/1.1 request, then close)
//!     → back to listener.rs for the next accept
//! ```
//!
//! # Design Decisions
//! - One connection in flight at a time; the accept loop does not spawn
//! - Keep-alive is disabled so a client cannot hold the loop open between requests
//! - Parallel serving would require the capture log append to stay serialized

pub mod connection;
pub mod listener;

pub use connection::{serve_connection, ConnectionId};
pub use listener::{Listener, ListenerError};
