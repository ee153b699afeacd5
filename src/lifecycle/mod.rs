//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → Load config → Validate → Open capture log → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Finish the request in flight → Stop accepting → Exit 0
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)
//! - No forced cancellation of the connection being served

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
