use tokio::sync::watch;
use tracing::debug;

/// Creates a connected stop pair. The `StopHandle` stays with whoever decides when the
/// loop is over; the `StopSignal` goes to the running ticker, which checks it every
/// iteration.
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (sender, receiver) = watch::channel(false);
    (StopHandle { sender }, StopSignal { receiver })
}

/// The firing side of a stop channel.
#[derive(Debug)]
pub struct StopHandle {
    sender: watch::Sender<bool>,
}

impl StopHandle {
    /// Fires the stop signal. Idempotent: firing an already-fired signal does nothing.
    pub fn stop(&self) {
        if self.sender.send(true).is_err() {
            debug!("Stop fired with no listener left");
        }
    }
}

/// The listening side of a stop channel. Clonable so a single handle can stop several
/// tickers at once.
#[derive(Debug, Clone)]
pub struct StopSignal {
    receiver: watch::Receiver<bool>,
}

impl StopSignal {
    /// Returns `true` once the signal has fired.
    pub fn is_stopped(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Completes once the stop signal has fired. Dropping the `StopHandle` without
    /// firing it does NOT resolve this future: an unguarded ticker keeps running.
    pub async fn fired(&mut self) {
        loop {
            if *self.receiver.borrow_and_update() {
                return;
            }
            if self.receiver.changed().await.is_err() {
                // Handle dropped without firing.
                std::future::pending::<()>().await;
            }
        }
    }
}
