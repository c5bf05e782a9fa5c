//! Transaction Signing
//!
//! Signing and signer recovery as pure functions over [`Transaction`]
//! values. [`Transaction::sign`] and [`Transaction::recover`] wrap these and
//! commit the result.

use super::normalize::{to_hex_str, to_raw, RawField};
use super::payload::signing_hash;
use super::transaction::Transaction;
use super::types::FieldValue;
use super::vfield::{parse_v, VField};
use crate::address::Address;
use crate::error::{TxError, TxResult};
use crate::utils::crypto::{recover_public_key, sign_digest, PrivateKey};
use crate::{log_debug, log_warn};

/// Return a signed copy of `tx`.
///
/// The recovery id from the signature replaces the recovery bit of `v`;
/// type, version and chain id are taken from the transaction fields.
pub fn sign(tx: &Transaction, private_key: &PrivateKey) -> TxResult<Transaction> {
    let digest = signing_hash(tx)?;
    let signature = sign_digest(private_key, &digest)?;

    let mut signed = tx.clone();
    signed.v = VField {
        tx_type: tx.tx_type,
        version: tx.version,
        recovery: signature.recovery_id,
        chain_id: tx.chain_id,
    }
    .pack();
    signed.r = FieldValue::Bytes(signature.r.to_vec());
    signed.s = FieldValue::Bytes(signature.s.to_vec());
    // a signer recovered from an earlier signature no longer applies
    signed.from = None;

    log_debug!(
        "signer",
        "transaction signed",
        digest = to_hex_str(&digest),
        recovery = signature.recovery_id,
        v = signed.v,
    );

    Ok(signed)
}

/// Recover the address that signed `tx` from its `v`, `r` and `s`
pub fn recover_signer(tx: &Transaction) -> TxResult<Address> {
    let recovery = parse_v(tx.v).recovery;
    let digest = signing_hash(tx)?;
    let r = signature_component("r", &tx.r)?;
    let s = signature_component("s", &tx.s)?;

    let public_key = recover_public_key(&digest, recovery, &r, &s).ok_or_else(|| {
        log_warn!(
            "signer",
            "signature recovery failed",
            digest = to_hex_str(&digest),
            recovery = recovery,
        );
        TxError::InvalidSignature("no public key recovers from this signature".to_string())
    })?;

    let from = Address::from_public_key(&public_key);
    log_debug!("signer", "signer recovered", from = from.to_string());
    Ok(from)
}

/// Minimal bytes of a signature part, left-padded back to 32 bytes
fn signature_component(field: &'static str, value: &FieldValue) -> TxResult<[u8; 32]> {
    let bytes = to_raw(field, RawField::Numeric(value), None)?;
    if bytes.len() > 32 {
        return Err(TxError::InvalidSignature(format!(
            "{} is {} bytes, expected at most 32",
            field,
            bytes.len()
        )));
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::types::TxConfig;
    use crate::utils::chain_config::ChainConfig;

    fn test_key() -> PrivateKey {
        let mut key = [0u8; 32];
        key[31] = 1;
        PrivateKey::from_bytes(&key).unwrap()
    }

    fn unsigned_tx() -> Transaction {
        Transaction::new(
            TxConfig::new()
                .to("0x015780f8456f9c1532645087a19dcf9a7e0c7f97")
                .amount(100u64)
                .expiration_time(1_544_584_596u64),
            &ChainConfig::new(100),
        )
    }

    #[test]
    fn test_sign_is_pure() {
        let tx = unsigned_tx();
        let signed = sign(&tx, &test_key()).unwrap();

        assert!(tx.r.is_blank());
        assert_eq!(parse_v(tx.v).recovery, 0);
        assert!(!signed.r.is_blank());
        assert!(!signed.s.is_blank());
        assert_eq!(parse_v(signed.v).chain_id, 100);
    }

    #[test]
    fn test_recover_matches_key() {
        let signed = sign(&unsigned_tx(), &test_key()).unwrap();
        let expected = Address::from_public_key(&test_key().public_key().unwrap());

        assert_eq!(recover_signer(&signed).unwrap(), expected);
    }

    #[test]
    fn test_recover_unsigned_fails() {
        let err = recover_signer(&unsigned_tx()).unwrap_err();
        assert!(matches!(err, TxError::InvalidSignature(_)));
    }

    #[test]
    fn test_oversized_signature_part_rejected() {
        let mut signed = sign(&unsigned_tx(), &test_key()).unwrap();
        signed.r = FieldValue::Bytes(vec![0x01; 33]);

        assert!(matches!(
            recover_signer(&signed),
            Err(TxError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_signature_survives_hex_round_trip() {
        let signed = sign(&unsigned_tx(), &test_key()).unwrap();
        let mut copy = signed.clone();
        copy.r = FieldValue::Text(to_hex_str(&to_raw("r", RawField::Numeric(&signed.r), None).unwrap()));
        copy.s = FieldValue::Text(to_hex_str(&to_raw("s", RawField::Numeric(&signed.s), None).unwrap()));

        assert_eq!(recover_signer(&copy).unwrap(), recover_signer(&signed).unwrap());
    }
}
