//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT)
//! - Log the shutdown request and trigger shutdown
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Falls back to Ctrl+C where Unix signals are unavailable

use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Wait for SIGINT or SIGTERM and return the signal name.
#[cfg(unix)]
pub async fn wait_for_termination() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
        (Ok(mut interrupt), Ok(mut terminate)) => {
            tokio::select! {
                _ = interrupt.recv() => "SIGINT",
                _ = terminate.recv() => "SIGTERM",
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "Failed to install Unix signal handlers, using Ctrl+C");
            ctrl_c().await
        }
    }
}

/// Wait for Ctrl+C.
#[cfg(not(unix))]
pub async fn wait_for_termination() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    "Ctrl+C"
}

/// Spawn a task that triggers `shutdown` on the first termination signal.
pub fn spawn_signal_handler(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        let signal = wait_for_termination().await;
        tracing::info!(signal, "Shutdown requested, stopping monitor");
        shutdown.trigger();
    })
}
