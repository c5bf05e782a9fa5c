//! Utilities Module
//!
//! Crypto primitives, logging and chain configuration shared by the
//! transaction layer.

pub mod chain_config;
pub mod crypto;
pub mod logging;

pub use chain_config::*;
pub use crypto::*;
