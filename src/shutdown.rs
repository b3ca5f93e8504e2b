use tokio::sync::broadcast;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

/// Broadcast channel size for shutdown notifications (single signal fan-out).
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Returns true once a shutdown has been broadcast or every sender is gone.
pub(crate) fn shutdown_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Ok(()) | Err(broadcast::error::TryRecvError::Lagged(_)) => true,
        Err(broadcast::error::TryRecvError::Empty) => false,
        Err(broadcast::error::TryRecvError::Closed) => false,
    }
}

/// Forwards Ctrl+C (and SIGTERM on unix) into the shutdown channel.
///
/// The task also exits when a shutdown is broadcast from elsewhere, so it
/// can be awaited once the run is over.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();

        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::warn!("Interrupt received, finishing in-flight requests.");
                    drop(shutdown_tx.send(()));
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    tracing::warn!("SIGTERM received, finishing in-flight requests.");
                    drop(shutdown_tx.send(()));
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::warn!("Interrupt received, finishing in-flight requests.");
                    drop(shutdown_tx.send(()));
                }
            }
        }
    })
}
