//! Transaction Type Definitions
//!
//! Input values, construction config and lifecycle state.

use crate::address::Address;
use ethers_core::types::U256;
use serde::{Deserialize, Deserializer};

/// Default gas price in wei (3 Gmo)
pub const DEFAULT_GAS_PRICE: u64 = 3_000_000_000;

pub const DEFAULT_GAS_LIMIT: u64 = 2_000_000;

/// A field value as supplied by the caller.
///
/// Normalization into canonical bytes happens at serialization time, per
/// variant, so fields can still be edited after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(u64),
    Big(U256),
    /// Decimal digits, `0x`-prefixed hex, or free text for text fields
    Text(String),
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// True for zero, empty text and empty bytes
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Int(n) => *n == 0,
            FieldValue::Big(n) => n.is_zero(),
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Bytes(b) => b.is_empty(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Bytes(Vec::new())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Int(n as u64)
    }
}

impl From<u128> for FieldValue {
    fn from(n: u128) -> Self {
        FieldValue::Big(U256::from(n))
    }
}

impl From<U256> for FieldValue {
    fn from(n: U256) -> Self {
        FieldValue::Big(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(b: Vec<u8>) -> Self {
        FieldValue::Bytes(b)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(b: &[u8]) -> Self {
        FieldValue::Bytes(b.to_vec())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldValue {
    Int(u64),
    Text(String),
    Bytes(Vec<u8>),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawFieldValue::deserialize(deserializer)? {
            RawFieldValue::Int(n) => FieldValue::Int(n),
            RawFieldValue::Text(s) => FieldValue::Text(s),
            RawFieldValue::Bytes(b) => FieldValue::Bytes(b),
        })
    }
}

/// Transaction construction options.
///
/// When `v` is present it wins: type, version and chain id are decoded
/// from it and the individual options are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxConfig {
    #[serde(rename = "type")]
    pub tx_type: Option<u32>,
    pub version: Option<u32>,
    pub chain_id: Option<u32>,
    pub to: Option<String>,
    pub to_name: Option<String>,
    pub gas_price: Option<FieldValue>,
    pub gas_limit: Option<FieldValue>,
    pub amount: Option<FieldValue>,
    pub data: Option<FieldValue>,
    pub expiration_time: Option<FieldValue>,
    pub message: Option<String>,
    pub r: Option<FieldValue>,
    pub s: Option<FieldValue>,
    #[serde(default, deserialize_with = "super::normalize::deserialize_v")]
    pub v: Option<u32>,
}

impl TxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tx_type(mut self, tx_type: u32) -> Self {
        self.tx_type = Some(tx_type);
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn chain_id(mut self, chain_id: u32) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn to_name(mut self, to_name: impl Into<String>) -> Self {
        self.to_name = Some(to_name.into());
        self
    }

    pub fn gas_price(mut self, gas_price: impl Into<FieldValue>) -> Self {
        self.gas_price = Some(gas_price.into());
        self
    }

    pub fn gas_limit(mut self, gas_limit: impl Into<FieldValue>) -> Self {
        self.gas_limit = Some(gas_limit.into());
        self
    }

    pub fn amount(mut self, amount: impl Into<FieldValue>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn data(mut self, data: impl Into<FieldValue>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn expiration_time(mut self, expiration_time: impl Into<FieldValue>) -> Self {
        self.expiration_time = Some(expiration_time.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn v(mut self, v: u32) -> Self {
        self.v = Some(v);
        self
    }
}

/// Lifecycle of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// No signature yet; the recovery bit of `v` is 0
    Unsigned,
    Signed,
    /// Signed, and the signer address has been recovered
    Recovered(Address),
}
