//! Cancellation token for the replay loop
//!
//! [`ShutdownHandle`] is held by whoever may stop replay (the Ctrl-C handler,
//! a test). [`ShutdownSignal`] is held by the loop. Triggering latches a flag
//! and pushes a wake-up message, so a loop parked in
//! [`ShutdownSignal::wait_timeout`] returns early instead of finishing its
//! sleep.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Create a connected handle/signal pair
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownSignal) {
    let stopped = Arc::new(AtomicBool::new(false));
    let (wake_tx, wake_rx) = bounded(1);
    (
        ShutdownHandle {
            stopped: Arc::clone(&stopped),
            wake_tx,
        },
        ShutdownSignal { stopped, wake_rx },
    )
}

/// Triggers a stop
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    stopped: Arc<AtomicBool>,
    wake_tx: Sender<()>,
}

impl ShutdownHandle {
    /// Request a stop. Idempotent.
    pub fn trigger(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        // Channel is bounded(1); a pending wake-up is enough
        let _ = self.wake_tx.try_send(());
    }

    /// Whether a stop has been requested
    pub fn is_triggered(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Observes stop requests
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    stopped: Arc<AtomicBool>,
    wake_rx: Receiver<()>,
}

impl ShutdownSignal {
    /// Whether a stop has been requested
    pub fn is_triggered(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Sleep for up to `timeout`, waking early on a stop request
    ///
    /// Returns `true` if a stop has been requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        if self.is_triggered() {
            return true;
        }

        match self.wake_rx.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => self.is_triggered(),
            Err(RecvTimeoutError::Disconnected) => {
                // Every handle is gone, nobody can wake us: plain sleep
                std::thread::sleep(timeout);
                self.is_triggered()
            }
        }
    }
}
