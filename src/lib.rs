//! LemoChain Transaction Core
//!
//! Builds, canonically encodes, hashes, signs and verifies LemoChain
//! transactions for wallet clients.
//!
//! # Architecture
//!
//! This crate provides:
//! - **tx**: transaction model, field normalization, v-field codec,
//!   canonical payloads, signing and signer recovery, JSON projection
//! - **address**: 20-byte addresses in hex and Lemo text form
//! - **utils**: keccak/secp256k1 primitives, chain config, logging
//!
//! # Example
//!
//! ```rust,ignore
//! use lemo_tx::{ChainConfig, PrivateKey, Transaction, TxConfig};
//!
//! let chain = ChainConfig::new(100);
//! let mut tx = Transaction::new(TxConfig::new().to("0x01").amount(1000u64), &chain);
//! let hash = tx.sign(&PrivateKey::from_hex(key_hex)?)?;
//! let from = tx.recover()?;
//! println!("{} signed {}", from, hex::encode(hash));
//! ```

pub mod address;
pub mod error;
pub mod tx;
pub mod utils;

pub use address::Address;
pub use error::{ErrorCode, TxError, TxResult};
pub use tx::{FieldValue, Transaction, TxConfig, TxJson, TxState};
pub use utils::chain_config::ChainConfig;
pub use utils::crypto::{keccak256, PrivateKey};
