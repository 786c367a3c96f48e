//! Graceful shutdown coordinator.
//!
//! Listens for SIGINT (Ctrl+C) and SIGTERM. The first signal cancels
//! [`ShutdownSignals::stop`]: the sync loop starts no new downloads but lets
//! the current one finish. The second cancels [`ShutdownSignals::abort`]: the
//! in-flight download is dropped. Both paths still log out before the
//! process exits. A third signal force-exits without logging out.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Tokens cancelled by successive shutdown signals.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignals {
    pub stop: CancellationToken,
    pub abort: CancellationToken,
}

/// Install signal handlers and return the tokens they cancel.
pub(crate) fn install_signal_handler() -> std::io::Result<ShutdownSignals> {
    let signals = ShutdownSignals::default();
    let count = Arc::new(AtomicU32::new(0));

    #[cfg(unix)]
    let mut sigterm = {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())?
    };

    let handler = signals.clone();
    tokio::spawn(async move {
        loop {
            #[cfg(unix)]
            {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
            }

            match count.fetch_add(1, Ordering::SeqCst) {
                0 => {
                    tracing::info!("Received shutdown signal, finishing the current download...");
                    tracing::info!("Press Ctrl+C again to abort it and log out");
                    handler.stop.cancel();
                }
                1 => {
                    tracing::warn!("Aborting the current download, logging out...");
                    handler.abort.cancel();
                }
                _ => {
                    tracing::warn!("Force exit requested, session left open");
                    std::process::exit(130);
                }
            }
        }
    });

    Ok(signals)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Signal delivery can't be safely tested in a shared test binary.
    #[tokio::test]
    async fn install_returns_live_tokens() {
        let signals = install_signal_handler().unwrap();
        assert!(!signals.stop.is_cancelled());
        assert!(!signals.abort.is_cancelled());
    }

    #[test]
    fn tokens_are_independent() {
        let signals = ShutdownSignals::default();
        signals.stop.cancel();
        assert!(!signals.abort.is_cancelled());
    }
}
