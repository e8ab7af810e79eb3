//! # Handoff Channel
//! This crate provides an unbuffered rendezvous channel built on top of Tokio's primitives
//!
//! ## Overview
//! In its current version, this crate introduces:
//! - **Rendezvous Semantics**: `send` suspends its caller until the matching `recv` has
//!   taken the value, instead of returning as soon as the value is queued.
//!
//! ## Usage Example
//! ```rust
//! #[tokio::main]
//! async fn main() {
//!     use handoff_channel::channel;
//!
//!     let (sender, mut receiver) = channel();
//!
//!     tokio::spawn(async move {
//!         // Only returns once the value has been taken on the other side.
//!         sender.send(1).await.unwrap();
//!     });
//!
//!     assert_eq!(receiver.recv().await, Some(1));
//! }
//! ```
//! ## Features
//! - Pairwise handoff between exactly two tasks: the `Sender` is not clonable and the
//!   `Receiver` is unique.
//! - Values are delivered at most once, in send order.

mod channels;

pub use channels::{channel, HandoffError, Receiver, Sender};
