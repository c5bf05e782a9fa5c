//! LemoChain Address Codec
//!
//! An address is 20 bytes. Its external text form is either `0x`-prefixed
//! hex or the LemoChain form: `"Lemo"` followed by the base-26 rendering of
//! `address || checksum`, upper-cased, with `I` written as `W` and `O` as `X`.

use crate::error::{TxError, TxResult};
use crate::utils::crypto::keccak256;
use ethers_core::types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_LENGTH: usize = 20;

const LEMO_LOGO: &str = "Lemo";
const BASE26_DIGITS: &[u8; 26] = b"0123456789ABCDEFGHIJKLMNOP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derive the address of an uncompressed secp256k1 public key
    pub fn from_public_key(public_key: &[u8; 65]) -> Self {
        let hash = keccak256(&public_key[1..]);
        let mut address = [0u8; ADDRESS_LENGTH];
        address.copy_from_slice(&hash[12..]);
        Self(address)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = [0u8; ADDRESS_LENGTH + 1];
        payload[..ADDRESS_LENGTH].copy_from_slice(&self.0);
        payload[ADDRESS_LENGTH] = checksum(&self.0);

        let mut value = U256::from_big_endian(&payload);
        let radix = U256::from(26u8);
        let mut digits = Vec::new();
        while !value.is_zero() {
            let (quotient, remainder) = value.div_mod(radix);
            digits.push(BASE26_DIGITS[remainder.low_u32() as usize]);
            value = quotient;
        }
        if digits.is_empty() {
            digits.push(b'0');
        }

        let body: String = digits
            .iter()
            .rev()
            .map(|&d| match d {
                b'I' => 'W',
                b'O' => 'X',
                other => other as char,
            })
            .collect();

        write!(f, "{}{}", LEMO_LOGO, body)
    }
}

impl FromStr for Address {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_address(s)?;
        if bytes.len() > ADDRESS_LENGTH {
            return Err(TxError::InvalidAddress(format!(
                "Expected at most {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            )));
        }
        let mut address = [0u8; ADDRESS_LENGTH];
        address[ADDRESS_LENGTH - bytes.len()..].copy_from_slice(&bytes);
        Ok(Self(address))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// XOR of every byte after the first
fn checksum(address: &[u8]) -> u8 {
    address.iter().skip(1).fold(0u8, |acc, b| acc ^ b)
}

pub fn has_0x_prefix(text: &str) -> bool {
    text.get(..2).map_or(false, |p| p.eq_ignore_ascii_case("0x"))
}

/// Decode the external text form of an address into raw bytes.
///
/// Hex input is not length-checked here; an empty string decodes to an
/// empty byte string.
pub fn decode_address(text: &str) -> TxResult<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if has_0x_prefix(text) {
        return decode_hex_padded(&text[2..])
            .map_err(|e| TxError::InvalidAddress(format!("{}: {}", text, e)));
    }
    let has_logo = text
        .get(..LEMO_LOGO.len())
        .map_or(false, |p| p.eq_ignore_ascii_case(LEMO_LOGO));
    if has_logo && text.len() > LEMO_LOGO.len() {
        return decode_lemo(&text[LEMO_LOGO.len()..]).map(|a| a.0.to_vec());
    }
    Err(TxError::InvalidAddress(format!("Unrecognized address format: {}", text)))
}

fn decode_lemo(body: &str) -> TxResult<Address> {
    let radix = U256::from(26u8);
    let mut value = U256::zero();

    for ch in body.chars() {
        let digit = match ch.to_ascii_uppercase() {
            'W' => 18, // I
            'X' => 24, // O
            c @ '0'..='9' => c as u32 - '0' as u32,
            c @ 'A'..='P' => c as u32 - 'A' as u32 + 10,
            other => {
                return Err(TxError::InvalidAddress(format!(
                    "Invalid character '{}' in Lemo address",
                    other
                )))
            }
        };
        value = value
            .checked_mul(radix)
            .and_then(|v| v.checked_add(U256::from(digit)))
            .ok_or_else(|| TxError::InvalidAddress("Lemo address overflows".to_string()))?;
    }

    let mut full = [0u8; 32];
    value.to_big_endian(&mut full);
    let payload_start = full.len() - (ADDRESS_LENGTH + 1);
    if full[..payload_start].iter().any(|&b| b != 0) {
        return Err(TxError::InvalidAddress("Lemo address is too long".to_string()));
    }

    let mut address = [0u8; ADDRESS_LENGTH];
    address.copy_from_slice(&full[payload_start..payload_start + ADDRESS_LENGTH]);
    if checksum(&address) != full[31] {
        return Err(TxError::InvalidAddress("Lemo address checksum mismatch".to_string()));
    }

    Ok(Address(address))
}

/// Hex decode, left-padding an odd-length string with one `0` nibble
pub(crate) fn decode_hex_padded(digits: &str) -> Result<Vec<u8>, hex::FromHexError> {
    if digits.len() % 2 == 1 {
        hex::decode(format!("0{}", digits))
    } else {
        hex::decode(digits)
    }
}
