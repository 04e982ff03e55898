//! Client-side plumbing for posting Pyth price updates and invoking a
//! consumer instruction that reads them.

pub mod builder;
pub mod env;
pub mod logs;
pub mod transactions;

pub use logs::LogColor;
