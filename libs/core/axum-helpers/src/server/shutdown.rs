use std::future::Future;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

/// Completes on Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and its branch never fires.
pub async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };
    info!(signal = received, "Shutdown requested, draining connections");
}

/// Runs `cleanup` for at most `limit`. Returns `false` when it was cut short.
pub async fn run_cleanup<F>(cleanup: F, limit: Duration) -> bool
where
    F: Future<Output = ()>,
{
    info!(?limit, "Running cleanup");
    match tokio::time::timeout(limit, cleanup).await {
        Ok(()) => {
            info!("Cleanup completed");
            true
        }
        Err(_) => {
            warn!(?limit, "Cleanup timed out, exiting anyway");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_finishes_within_limit() {
        assert!(run_cleanup(async {}, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_slow_cleanup_is_abandoned() {
        let slow = tokio::time::sleep(Duration::from_secs(5));
        assert!(!run_cleanup(slow, Duration::from_millis(10)).await);
    }
}
