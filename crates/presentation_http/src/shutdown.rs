//! Shutdown handling
//!
//! A termination signal stops the listener and starts a drain period.
//! Connections still open when the configured grace period runs out are
//! dropped instead of holding the process open.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::{signal, sync::Notify};
use tracing::{error, info, warn};

/// How the server stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every connection closed within the grace period
    Drained,
    /// The grace period elapsed with connections still open
    TimedOut,
}

/// Resolves on SIGINT or SIGTERM
pub async fn termination_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(e) => {
                error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => info!(signal = "SIGINT", "Stopping listener"),
        () = terminate => info!(signal = "SIGTERM", "Stopping listener"),
    }
}

/// Waits for `signal`, then marks the start of the drain period
///
/// Meant to be handed to `with_graceful_shutdown`.
pub async fn begin_drain<S>(signal: S, drain_started: Arc<Notify>)
where
    S: Future<Output = ()>,
{
    signal.await;
    drain_started.notify_one();
}

/// Runs `server` until it returns, or until `grace` has elapsed since the
/// drain period started
pub async fn run_until_drained<F, E>(
    server: F,
    drain_started: Arc<Notify>,
    grace: Duration,
) -> Result<ShutdownOutcome, E>
where
    F: Future<Output = Result<(), E>>,
{
    let deadline = async {
        drain_started.notified().await;
        info!(grace_secs = grace.as_secs(), "Draining open connections");
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => result.map(|()| ShutdownOutcome::Drained),
        () = deadline => {
            warn!(grace_secs = grace.as_secs(), "Grace period elapsed, dropping open connections");
            Ok(ShutdownOutcome::TimedOut)
        }
    }
}
