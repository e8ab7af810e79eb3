use crate::{
    errors::{TickerError, TickerResult},
    stop::StopSignal,
    Sender,
};
use std::fmt;
use tokio::{
    task::JoinHandle,
    time::{sleep, Duration},
};
use tracing::error;

/// One emission of a running ticker: the label the ticker was started with and the
/// position of the emission in the sequence, starting at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub label: String,
    pub seq: u64,
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.seq)
    }
}

/// A unit of work that emits its label at a fixed period, forever, until its stop
/// signal fires or its sink is dropped. The counter is local to the instance: tickers
/// running concurrently never share sequence numbers.
///
/// The loop can be driven in two ways:
/// - `run` keeps it on the caller's task; the caller is suspended for the lifetime
///   of the loop.
/// - `spawn` hands it to the Tokio scheduler; the caller continues immediately.
pub struct Ticker {
    label: String,
    period: Duration,
}

impl Ticker {
    pub fn new(label: impl Into<String>, period: Duration) -> Self {
        Self {
            label: label.into(),
            period,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Drives the tick loop on the caller's task. Emits `Tick { label, seq }` for
    /// seq = 0, 1, 2, ... and pauses `period` between emissions. Returns `Ok(())` once
    /// the stop signal fires, or `TickerError::SinkClosed` if the receiving side of
    /// the sink is gone.
    pub async fn run(self, sink: Sender<Tick>, mut stop: StopSignal) -> TickerResult<()> {
        let mut seq: u64 = 0;
        loop {
            if stop.is_stopped() {
                return Ok(());
            }
            let tick = Tick {
                label: self.label.clone(),
                seq,
            };
            if sink.send(tick).await.is_err() {
                return Err(TickerError::SinkClosed(self.label));
            }
            seq += 1;
            tokio::select! {
                () = stop.fired() => return Ok(()),
                () = sleep(self.period) => {}
            }
        }
    }

    /// Launches the tick loop on its own Tokio task and returns immediately. The
    /// outcome of the loop is surfaced through the returned handle; an early exit is
    /// also logged, since detached callers never join.
    ///
    /// A ticker spawned right before runtime shutdown may be cancelled before its
    /// first emission; whether anything is emitted in that window is a race. Await
    /// the first tick (or the handle) when that matters.
    pub fn spawn(self, sink: Sender<Tick>, stop: StopSignal) -> JoinHandle<TickerResult<()>> {
        tokio::spawn(async move {
            let result = self.run(sink, stop).await;
            if let Err(e) = &result {
                error!("Ticker ended early: {e}");
            }
            result
        })
    }
}

#[tokio::test]
async fn test_emits_label_and_increasing_seq() {
    let (sender, mut receiver) = crate::tick_channel();
    let (stop_handle, stop) = crate::stop_channel();

    Ticker::new("boring", Duration::from_millis(1)).spawn(sender, stop);

    for expected in 0..5u64 {
        let tick = receiver.recv().await.unwrap();
        assert_eq!(tick.label, "boring");
        assert_eq!(tick.seq, expected);
    }
    stop_handle.stop();
}

#[tokio::test]
async fn test_spawn_does_not_block_caller() {
    let (sender, mut receiver) = crate::tick_channel();
    let (_stop_handle, stop) = crate::stop_channel();

    // A period this long would hang the test if spawn suspended the caller.
    let handle = Ticker::new("background", Duration::from_secs(60)).spawn(sender, stop);

    let first = receiver.recv().await.unwrap();
    assert_eq!(first.seq, 0);
    handle.abort();
}

#[tokio::test]
async fn test_run_holds_the_caller_until_stopped() {
    let (sender, mut receiver) = crate::tick_channel();
    let (stop_handle, stop) = crate::stop_channel();

    tokio::spawn(async move { while receiver.recv().await.is_some() {} });
    let stopper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        stop_handle.stop();
    });

    Ticker::new("foreground", Duration::from_millis(1))
        .run(sender, stop)
        .await
        .unwrap();
    stopper.await.unwrap();
}

#[tokio::test]
async fn test_stop_ends_the_loop() {
    let (sender, mut receiver) = crate::tick_channel();
    let (stop_handle, stop) = crate::stop_channel();

    let handle = Ticker::new("stoppable", Duration::from_millis(1)).spawn(sender, stop);
    receiver.recv().await.unwrap();
    stop_handle.stop();

    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_stop_before_first_emission() {
    let (sender, mut receiver) = crate::tick_channel();
    let (stop_handle, stop) = crate::stop_channel();
    stop_handle.stop();

    Ticker::new("never", Duration::from_millis(1))
        .run(sender, stop)
        .await
        .unwrap();

    assert!(receiver.recv().await.is_none());
}

#[tokio::test]
async fn test_dropped_sink_ends_with_error() {
    let (sender, receiver) = crate::tick_channel();
    let (_stop_handle, stop) = crate::stop_channel();
    drop(receiver);

    let ticker = Ticker::new("orphan", Duration::from_millis(1));
    assert_eq!(ticker.label(), "orphan");
    let result = ticker.run(sender, stop).await;

    assert!(matches!(result, Err(TickerError::SinkClosed(label)) if label == "orphan"));
}

#[tokio::test]
async fn test_concurrent_tickers_keep_local_counters() {
    let (sender, mut receiver) = crate::tick_channel();
    let (stop_handle, stop) = crate::stop_channel();

    for label in ["left", "right"] {
        Ticker::new(label, Duration::from_millis(1)).spawn(sender.clone(), stop.clone());
    }
    drop(sender);

    let mut next_expected = std::collections::HashMap::new();
    for _ in 0..20 {
        let tick = receiver.recv().await.unwrap();
        let expected = next_expected.entry(tick.label.clone()).or_insert(0u64);
        assert_eq!(tick.seq, *expected);
        *expected += 1;
    }
    assert_eq!(next_expected.len(), 2);
    stop_handle.stop();
}
