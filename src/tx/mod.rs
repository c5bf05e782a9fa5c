//! Transaction Module
//!
//! Builds, canonically encodes, hashes, signs and recovers LemoChain
//! transactions. Any change to field order, number encoding or the layout
//! of `v` changes the digests, so the encoding rules here are exact.

pub mod json;
pub mod normalize;
pub mod payload;
pub mod signer;
pub mod transaction;
pub mod types;
pub mod vfield;


pub use json::TxJson;
pub use normalize::RawField;
pub use transaction::Transaction;
pub use types::*;
pub use vfield::{combine_v, parse_v, VField};
