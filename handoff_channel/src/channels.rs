use thiserror::Error;
use tokio::sync::{
    mpsc::{channel as tokio_channel, Receiver as TokioReceiver, Sender as TokioSender},
    oneshot,
};

/// A value in flight, together with the acknowledgement slot the receiver completes
/// once it has taken the value out.
struct Handoff<T> {
    value: T,
    taken: oneshot::Sender<()>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandoffError {
    #[error("The receiving side of the handoff no longer exists")]
    Disconnected,
}

/// Creates a connected rendezvous pair.
///
/// The underlying Tokio channel holds a single in-flight value; the rendezvous is
/// enforced on top of it by having `send` wait for the receiver's acknowledgement
/// rather than for buffer space.
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let (sender, receiver) = tokio_channel(1);
    (Sender::new(sender), Receiver::new(receiver))
}

/// The offering side of a handoff. Not clonable: a handoff connects exactly two tasks.
#[derive(Debug)]
pub struct Sender<T> {
    sender: TokioSender<Handoff<T>>,
}

/// The taking side of a handoff. There is exactly one receiver per channel.
#[derive(Debug)]
pub struct Receiver<T> {
    receiver: TokioReceiver<Handoff<T>>,
}

impl<T> Sender<T> {
    /// Private constructor. To create a `Sender`, use `channel`.
    fn new(sender: TokioSender<Handoff<T>>) -> Self {
        Self { sender }
    }

    /// Offers `value` to the receiver and suspends the caller until the value has been
    /// taken by a `recv` call. Returns `HandoffError::Disconnected` if the receiver is
    /// already gone, or goes away before taking the value; in that case the value is
    /// dropped, never delivered.
    pub async fn send(&self, value: T) -> Result<(), HandoffError> {
        let (taken, was_taken) = oneshot::channel();
        self.sender
            .send(Handoff { value, taken })
            .await
            .map_err(|_| HandoffError::Disconnected)?;
        was_taken.await.map_err(|_| HandoffError::Disconnected)
    }
}

impl<T> Receiver<T> {
    /// Private constructor. To create a `Receiver`, use `channel`.
    fn new(receiver: TokioReceiver<Handoff<T>>) -> Self {
        Self { receiver }
    }

    /// Suspends the caller until a sender offers a value, then takes it and releases
    /// the suspended sender. Returns `None` once the sender has been dropped and no
    /// value is in flight.
    pub async fn recv(&mut self) -> Option<T> {
        let Handoff { value, taken } = self.receiver.recv().await?;
        // The sender may already be gone; the value is still delivered.
        let _ = taken.send(());
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };
    use tokio::time::{sleep, Duration};

    #[tokio::test]
    async fn test_single_value_handoff() {
        let (sender, mut receiver) = channel();

        tokio::spawn(async move {
            sender.send(1).await.unwrap();
        });

        assert_eq!(receiver.recv().await, Some(1));
    }

    #[tokio::test]
    async fn test_send_suspends_until_received() {
        let (sender, mut receiver) = channel();
        let delivered = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&delivered);

        let handle = tokio::spawn(async move {
            sender.send(7).await.unwrap();
            flag.store(true, Ordering::SeqCst);
        });

        sleep(Duration::from_millis(20)).await;
        assert!(!delivered.load(Ordering::SeqCst));

        assert_eq!(receiver.recv().await, Some(7));
        handle.await.unwrap();
        assert!(delivered.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_values_arrive_in_send_order() {
        let (sender, mut receiver) = channel();

        tokio::spawn(async move {
            for v in 0..5 {
                sender.send(v).await.unwrap();
            }
        });

        for expected in 0..5 {
            assert_eq!(receiver.recv().await, Some(expected));
        }
    }

    #[tokio::test]
    async fn test_each_value_is_delivered_once() {
        let (sender, mut receiver) = channel();

        tokio::spawn(async move {
            sender.send(1).await.unwrap();
        });

        assert_eq!(receiver.recv().await, Some(1));
        // The sender is gone and nothing else was ever offered.
        assert_eq!(receiver.recv().await, None);
    }

    #[tokio::test]
    async fn test_recv_suspends_until_a_sender_arrives() {
        let (sender, mut receiver) = channel();

        let handle = tokio::spawn(async move {
            sleep(Duration::from_millis(20)).await;
            sender.send(9).await.unwrap();
        });

        assert_eq!(receiver.recv().await, Some(9));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_send_fails_on_dropped_receiver() {
        let (sender, receiver) = channel();
        drop(receiver);

        assert_eq!(sender.send(1).await, Err(HandoffError::Disconnected));
    }

    #[tokio::test]
    async fn test_receiver_dropped_while_send_is_suspended() {
        let (sender, receiver) = channel::<i32>();

        let handle = tokio::spawn(async move { sender.send(3).await });

        sleep(Duration::from_millis(20)).await;
        drop(receiver);

        assert_eq!(handle.await.unwrap(), Err(HandoffError::Disconnected));
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_sender_dropped() {
        let (sender, mut receiver) = channel::<i32>();
        drop(sender);

        assert_eq!(receiver.recv().await, None);
    }
}
