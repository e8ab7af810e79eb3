//! # Ticker Tasks
//! A simple and flexible label ticker for asynchronous execution in Rust.
//! This library provides a `Ticker` that emits its label with an increasing counter
//! at a fixed period, either on the caller's task or concurrently.
//!
//! ## Usage Example
//! ```rust
//! use ticker_tasks::{stop_channel, tick_channel, Ticker};
//! use tokio::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (sender, mut receiver) = tick_channel();
//!     let (stop_handle, stop) = stop_channel();
//!
//!     // Runs concurrently: the caller continues right away.
//!     let ticker = Ticker::new("boring", Duration::from_millis(1)).spawn(sender, stop);
//!
//!     let first = receiver.recv().await.unwrap();
//!     assert_eq!((first.label.as_str(), first.seq), ("boring", 0));
//!
//!     stop_handle.stop();
//!     ticker.await.unwrap().unwrap();
//! }
//! ```

/// This module contains error handling types.
pub mod errors;
/// The console surface: a task draining ticks to stdout.
pub mod printer;
/// The stop channel guarding the tick loop.
pub mod stop;
/// The implementation of the ticker.
pub mod ticker;

pub use errors::{TickerError, TickerResult};
pub use printer::spawn_printer;
pub use stop::{stop_channel, StopHandle, StopSignal};
pub use ticker::{Tick, Ticker};
pub use tokio::sync::mpsc::{Receiver, Sender};

pub type TickSender = Sender<Tick>;
pub type TickReceiver = Receiver<Tick>;

pub fn tick_channel() -> (TickSender, TickReceiver) {
    tokio::sync::mpsc::channel(100)
}
