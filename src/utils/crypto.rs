//! Crypto Primitives
//!
//! Keccak-256 hashing and secp256k1 recoverable ECDSA. The transaction
//! layer only reaches the curve through the functions in this file.

use crate::address::Address;
use crate::error::{TxError, TxResult};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroizing;

/// Keccak256 hash
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// A secp256k1 private key. The secret bytes are wiped on drop.
#[derive(Clone)]
pub struct PrivateKey {
    bytes: Zeroizing<[u8; 32]>,
}

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8]) -> TxResult<Self> {
        if bytes.len() != 32 {
            return Err(TxError::InvalidPrivateKey(format!(
                "Private key must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        if bytes.iter().all(|&b| b == 0) {
            return Err(TxError::InvalidPrivateKey("Private key is all zeros".to_string()));
        }

        SecretKey::from_slice(bytes).map_err(|e| TxError::InvalidPrivateKey(e.to_string()))?;

        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(bytes);
        Ok(Self { bytes: key })
    }

    /// Parse a hex private key, with or without `0x`
    pub fn from_hex(hex_key: &str) -> TxResult<Self> {
        let trimmed = hex_key.trim();
        let clean = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = Zeroizing::new(
            hex::decode(clean).map_err(|e| TxError::InvalidPrivateKey(e.to_string()))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Generate a fresh random key from the operating system RNG
    pub fn random() -> Self {
        let secp = Secp256k1::new();
        let (secret, _) = secp.generate_keypair(&mut rand::rngs::OsRng);
        Self {
            bytes: Zeroizing::new(secret.secret_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(*self.bytes)
    }

    /// Uncompressed public key (65 bytes, `0x04` prefix)
    pub fn public_key(&self) -> TxResult<[u8; 65]> {
        public_key_from_private(self.as_bytes())
    }

    pub fn address(&self) -> TxResult<Address> {
        Ok(Address::from_public_key(&self.public_key()?))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// Output of a recoverable ECDSA signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSig {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub recovery_id: u8,
}

pub fn public_key_from_private(private_key: &[u8; 32]) -> TxResult<[u8; 65]> {
    let secp = Secp256k1::new();
    let secret = SecretKey::from_slice(private_key)
        .map_err(|e| TxError::InvalidPrivateKey(e.to_string()))?;
    Ok(PublicKey::from_secret_key(&secp, &secret).serialize_uncompressed())
}

/// Sign a 32-byte digest
pub fn sign_digest(private_key: &PrivateKey, digest: &[u8; 32]) -> TxResult<RecoverableSig> {
    let secp = Secp256k1::new();
    let secret = SecretKey::from_slice(private_key.as_bytes())
        .map_err(|e| TxError::InvalidPrivateKey(e.to_string()))?;

    let message = Message::from_digest(*digest);
    let (recovery_id, compact) = secp
        .sign_ecdsa_recoverable(&message, &secret)
        .serialize_compact();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&compact[..32]);
    s.copy_from_slice(&compact[32..]);

    Ok(RecoverableSig {
        r,
        s,
        recovery_id: recovery_id.to_i32() as u8,
    })
}

/// Recover the uncompressed public key that produced `r`/`s` over `digest`.
///
/// Returns `None` when the signature components are malformed or no key
/// can be recovered.
pub fn recover_public_key(
    digest: &[u8; 32],
    recovery_id: u8,
    r: &[u8; 32],
    s: &[u8; 32],
) -> Option<[u8; 65]> {
    let secp = Secp256k1::new();

    let recovery_id = RecoveryId::from_i32(recovery_id as i32).ok()?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(r);
    compact[32..].copy_from_slice(s);

    let signature = RecoverableSignature::from_compact(&compact, recovery_id).ok()?;
    let message = Message::from_digest(*digest);

    secp.recover_ecdsa(&message, &signature)
        .ok()
        .map(|pk| pk.serialize_uncompressed())
}
