//! Client-side interface to the Pyth receiver program and its wormhole
//! verifier: program addresses, PDA derivations, the accumulator payload
//! codec, and instruction builders.
//!
//! This crate never talks to an RPC node; it only knows byte layouts and
//! account orderings.

mod error;
pub mod instructions;
pub mod pda;
pub mod program;
mod wire;

pub use error::*;
pub use wire::*;
