//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C, then trigger `shutdown`.
///
/// The first interrupt lets the request in flight finish. A second one exits
/// the process at once, so a hung upstream cannot keep the proxy alive.
/// If the handler cannot be installed the error is logged and the proxy keeps
/// running until killed.
pub async fn shutdown_on_interrupt(shutdown: &Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received; interrupt again to exit immediately");
            shutdown.trigger();
            tokio::spawn(exit_on_second_interrupt());
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}

async fn exit_on_second_interrupt() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!("Second interrupt received, exiting without waiting");
        std::process::exit(0);
    }
}
