//! Canonical Payloads
//!
//! Two RLP lists are built from a transaction:
//!
//! - signing payload, hashed and signed:
//!   `[type, version, chainId, to, toName, gasPrice, gasLimit, amount, data, expirationTime, message]`
//! - identifier payload, hashed into the transaction id:
//!   `[to, toName, gasPrice, gasLimit, amount, data, expirationTime, message, v, r, s]`
//!
//! `to` is always 20 bytes; every other field is minimal-length.

use super::normalize::{to_raw, RawField};
use super::transaction::Transaction;
use crate::address::ADDRESS_LENGTH;
use crate::error::TxResult;
use crate::utils::crypto::keccak256;
use ethers_core::utils::rlp::RlpStream;

/// Fields shared by both payloads, in wire order
fn body_fields(tx: &Transaction) -> TxResult<Vec<Vec<u8>>> {
    Ok(vec![
        to_raw("to", RawField::Address(&tx.to), Some(ADDRESS_LENGTH))?,
        to_raw("toName", RawField::Text(&tx.to_name), None)?,
        to_raw("gasPrice", RawField::Numeric(&tx.gas_price), None)?,
        to_raw("gasLimit", RawField::Numeric(&tx.gas_limit), None)?,
        to_raw("amount", RawField::Numeric(&tx.amount), None)?,
        to_raw("data", RawField::Numeric(&tx.data), None)?,
        to_raw("expirationTime", RawField::Numeric(&tx.expiration_time), None)?,
        to_raw("message", RawField::Text(&tx.message), None)?,
    ])
}

pub fn signing_fields(tx: &Transaction) -> TxResult<Vec<Vec<u8>>> {
    let mut fields = vec![
        to_raw("type", RawField::Uint(tx.tx_type as u64), None)?,
        to_raw("version", RawField::Uint(tx.version as u64), None)?,
        to_raw("chainId", RawField::Uint(tx.chain_id as u64), None)?,
    ];
    fields.extend(body_fields(tx)?);
    Ok(fields)
}

pub fn identifier_fields(tx: &Transaction) -> TxResult<Vec<Vec<u8>>> {
    let mut fields = body_fields(tx)?;
    fields.push(to_raw("v", RawField::Uint(tx.v as u64), None)?);
    fields.push(to_raw("r", RawField::Numeric(&tx.r), None)?);
    fields.push(to_raw("s", RawField::Numeric(&tx.s), None)?);
    Ok(fields)
}

/// RLP-encode a flat list of byte strings
pub fn encode_list(fields: &[Vec<u8>]) -> Vec<u8> {
    let mut stream = RlpStream::new_list(fields.len());
    for field in fields {
        stream.append(field);
    }
    stream.out().to_vec()
}

pub fn signing_payload(tx: &Transaction) -> TxResult<Vec<u8>> {
    Ok(encode_list(&signing_fields(tx)?))
}

pub fn identifier_payload(tx: &Transaction) -> TxResult<Vec<u8>> {
    Ok(encode_list(&identifier_fields(tx)?))
}

/// The digest that gets signed
pub fn signing_hash(tx: &Transaction) -> TxResult<[u8; 32]> {
    Ok(keccak256(&signing_payload(tx)?))
}

/// The transaction identifier
pub fn identifier_hash(tx: &Transaction) -> TxResult<[u8; 32]> {
    Ok(keccak256(&identifier_payload(tx)?))
}
