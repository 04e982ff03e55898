//! Client for the Pyth price service (Hermes) HTTP API.
//!
//! Fetches the latest signed price update payloads for a set of price feeds.
//! The payloads are opaque to this crate; decoding them is the `receiver`
//! crate's concern.

mod client;
mod error;
mod feed_id;

pub use client::*;
pub use error::*;
pub use feed_id::*;
