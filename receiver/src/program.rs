//! Addresses of the deployed programs this client talks to.
//!
//! Both programs are deployed at the same address on every Solana cluster.

use solana_address::Address;

/// The Pyth receiver program, which verifies and stores posted price updates.
pub const PYTH_RECEIVER_ID: Address =
    Address::from_str_const("rec5EKMGg6MxZYaMdyBfgwp4d5rB9T1VQH5pJv5LtFJ");

/// The wormhole program the receiver defers to for guardian signature checks.
pub const WORMHOLE_ID: Address =
    Address::from_str_const("HDwcJBJXjL9FpJ7UBsYBtaDjsBUhuLCUYoz3zr8SWWaQ");
