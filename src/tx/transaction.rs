//! Transaction Model
//!
//! A [`Transaction`] holds its fields as supplied. Nothing is normalized at
//! construction; canonical bytes are produced on every serialization, so a
//! field edited after construction is always encoded consistently.

use super::json::{to_json, TxJson};
use super::normalize::to_hex_str;
use super::payload::{identifier_hash, identifier_payload, signing_hash};
use super::signer;
use super::types::{FieldValue, TxConfig, TxState, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE};
use super::vfield::{combine_v, parse_v};
use crate::address::Address;
use crate::error::TxResult;
use crate::utils::chain_config::ChainConfig;
use crate::utils::crypto::PrivateKey;
use crate::log_debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction kind, 0 for a normal transfer
    pub tx_type: u8,
    /// Protocol version (7 bits)
    pub version: u8,
    pub chain_id: u16,
    /// Recipient in external text form (`0x` hex or Lemo), empty for none
    pub to: String,
    pub to_name: String,
    pub gas_price: FieldValue,
    pub gas_limit: FieldValue,
    /// Value in wei
    pub amount: FieldValue,
    pub data: FieldValue,
    /// Epoch seconds
    pub expiration_time: FieldValue,
    pub message: String,
    /// Packed type, version, recovery id and chain id
    pub v: u32,
    pub r: FieldValue,
    pub s: FieldValue,
    /// Set once the signer has been recovered
    pub from: Option<Address>,
}

impl Transaction {
    pub fn new(config: TxConfig, chain: &ChainConfig) -> Self {
        let v = match config.v {
            Some(v) => v,
            None => combine_v(
                config.tx_type.unwrap_or(0),
                config.version.unwrap_or(chain.tx_version as u32),
                0,
                config.chain_id.unwrap_or(chain.chain_id as u32),
            ),
        };
        let fields = parse_v(v);

        Self {
            tx_type: fields.tx_type,
            version: fields.version,
            chain_id: fields.chain_id,
            to: config.to.unwrap_or_default(),
            to_name: config.to_name.unwrap_or_default(),
            gas_price: config.gas_price.unwrap_or(FieldValue::Int(DEFAULT_GAS_PRICE)),
            gas_limit: config.gas_limit.unwrap_or(FieldValue::Int(DEFAULT_GAS_LIMIT)),
            amount: config.amount.unwrap_or(FieldValue::Int(0)),
            data: config.data.unwrap_or_default(),
            expiration_time: config
                .expiration_time
                .unwrap_or_else(|| FieldValue::Int(chain.default_expiration())),
            message: config.message.unwrap_or_default(),
            v,
            r: config.r.unwrap_or_default(),
            s: config.s.unwrap_or_default(),
            from: None,
        }
    }

    /// Build from a JSON projection, or failing that a construction config
    pub fn from_json_str(json: &str, chain: &ChainConfig) -> TxResult<Self> {
        let config = match serde_json::from_str::<TxJson>(json) {
            Ok(projected) => projected.into_config()?,
            Err(_) => serde_json::from_str::<TxConfig>(json)?,
        };
        Ok(Self::new(config, chain))
    }

    /// Canonical identifier payload (includes v, r, s)
    pub fn serialize(&self) -> TxResult<Vec<u8>> {
        identifier_payload(self)
    }

    /// Transaction identifier: keccak256 of [`Transaction::serialize`]
    pub fn hash(&self) -> TxResult<[u8; 32]> {
        identifier_hash(self)
    }

    pub fn signing_hash(&self) -> TxResult<[u8; 32]> {
        signing_hash(self)
    }

    pub fn to_json(&self) -> TxResult<TxJson> {
        to_json(self)
    }

    pub fn to_json_string(&self) -> TxResult<String> {
        Ok(serde_json::to_string(&self.to_json()?)?)
    }

    /// Sign in place and return the new identifier.
    ///
    /// `v`, `r` and `s` are replaced together only when signing and hashing
    /// both succeed; on error the transaction is left as it was.
    pub fn sign(&mut self, private_key: &PrivateKey) -> TxResult<[u8; 32]> {
        let signed = signer::sign(self, private_key)?;
        let hash = signed.hash()?;
        log_debug!("transaction", "signature committed", hash = to_hex_str(&hash));
        *self = signed;
        Ok(hash)
    }

    /// Recover the signer address and store it in `from`
    pub fn recover(&mut self) -> TxResult<Address> {
        let from = signer::recover_signer(self)?;
        self.from = Some(from);
        Ok(from)
    }

    pub fn state(&self) -> TxState {
        match self.from {
            Some(from) => TxState::Recovered(from),
            None if self.r.is_blank() && self.s.is_blank() => TxState::Unsigned,
            None => TxState::Signed,
        }
    }

    pub fn recovery_id(&self) -> u8 {
        parse_v(self.v).recovery
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new(TxConfig::default(), &ChainConfig::default())
    }
}
