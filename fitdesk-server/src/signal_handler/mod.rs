//! Graceful shutdown on SIGTERM, SIGHUP, SIGINT or ctrl-c

use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::sync::watch::{self, Receiver, Sender};

/// Is the entire app currently trying to shut down?
///
/// This will be synced via a global [`tokio::sync::watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InShutdown {
    Yes,
    No,
}

pub fn shutdown_channel() -> (Sender<InShutdown>, Receiver<InShutdown>) {
    watch::channel(InShutdown::No)
}

fn listen(
    kind: SignalKind,
    name: &str,
    shutdown_tx: &Sender<InShutdown>,
) -> Result<Signal, std::io::Error> {
    signal(kind).inspect_err(|e| {
        tracing::error!("Failed to install {name} listener: {e} Aborting.");
        shutdown_tx.send_replace(InShutdown::Yes);
    })
}

/// Wait for a shutdown signal and announce it on `shutdown_tx`
///
/// Returns early when some other part of the app starts the shutdown.
pub async fn signal_handler(
    mut watcher: Receiver<InShutdown>,
    shutdown_tx: Sender<InShutdown>,
) -> Result<(), std::io::Error> {
    let mut sigterm = listen(SignalKind::terminate(), "SIGTERM", &shutdown_tx)?;
    let mut sighup = listen(SignalKind::hangup(), "SIGHUP", &shutdown_tx)?;
    let mut sigint = listen(SignalKind::interrupt(), "SIGINT", &shutdown_tx)?;

    let reason = tokio::select! {
        _ = watcher.wait_for(|s| *s == InShutdown::Yes) => return Ok(()),
        _ = sigterm.recv() => "SIGTERM",
        _ = sighup.recv() => "SIGHUP",
        _ = sigint.recv() => "SIGINT",
        x = tokio::signal::ctrl_c() => match x {
            Ok(()) => "ctrl-c",
            Err(err) => {
                // we also shut down in case of error
                tracing::error!("Unable to listen for shutdown signal: {err}");
                "listener failure"
            }
        },
    };
    tracing::info!("Got {reason}. Shutting down.");
    shutdown_tx.send_replace(InShutdown::Yes);
    Ok(())
}

/// Resolves once the app is shutting down, for use with `axum::serve(..).with_graceful_shutdown`
pub async fn wait_for_shutdown(mut watcher: Receiver<InShutdown>) {
    // an error means every sender is gone, and nobody is left to announce anything
    let _ = watcher.wait_for(|s| *s == InShutdown::Yes).await;
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn shutdown_wakes_waiters() {
        let (tx, rx) = shutdown_channel();
        let waiter = tokio::spawn(wait_for_shutdown(rx));
        tx.send_replace(InShutdown::Yes);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn handler_stops_when_shutdown_starts_elsewhere() {
        let (tx, rx) = shutdown_channel();
        let handler = tokio::spawn(signal_handler(rx, tx.clone()));
        tx.send_replace(InShutdown::Yes);
        handler.await.unwrap().unwrap();
        assert_eq!(*tx.borrow(), InShutdown::Yes);
    }

    #[tokio::test]
    async fn dropped_sender_releases_waiters() {
        let (tx, rx) = shutdown_channel();
        drop(tx);
        wait_for_shutdown(rx).await;
    }
}
