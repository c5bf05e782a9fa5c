//! Field Normalization
//!
//! Turns field values into the canonical byte strings that go into the
//! RLP payloads:
//! - numbers become big-endian bytes, never the ASCII of their digits
//! - fixed-length fields are left-padded with zeros, or rejected if too long
//! - every other field is stripped of leading zero bytes, so zero encodes
//!   as the empty string

use super::types::FieldValue;
use crate::address::{decode_address, decode_hex_padded, has_0x_prefix};
use crate::error::{TxError, TxResult};
use ethers_core::types::U256;
use serde::{Deserialize, Deserializer};

/// A field together with how it must be interpreted
#[derive(Debug, Clone, Copy)]
pub enum RawField<'a> {
    Numeric(&'a FieldValue),
    /// A native integer such as type, version or chain id
    Uint(u64),
    Text(&'a str),
    /// Recipient in its external text form
    Address(&'a str),
}

/// Normalize a field into canonical bytes.
///
/// With `fixed_length` the bytes are left-padded to exactly that length and
/// longer input fails with [`TxError::FieldTooLong`]. Without it, leading
/// zero bytes are stripped.
pub fn to_raw(field: &'static str, value: RawField<'_>, fixed_length: Option<usize>) -> TxResult<Vec<u8>> {
    let bytes = match value {
        RawField::Numeric(v) => numeric_bytes(field, v)?,
        RawField::Uint(n) => n.to_be_bytes().to_vec(),
        RawField::Text(s) => text_bytes(field, s)?,
        RawField::Address(s) => decode_address(s)?,
    };

    match fixed_length {
        Some(length) => pad_left(field, bytes, length),
        None => Ok(trim_leading_zeros(&bytes).to_vec()),
    }
}

/// Raw big-endian bytes of a numeric field, before trimming
pub fn numeric_bytes(field: &'static str, value: &FieldValue) -> TxResult<Vec<u8>> {
    match value {
        FieldValue::Int(n) => Ok(n.to_be_bytes().to_vec()),
        FieldValue::Big(n) => Ok(u256_bytes(n)),
        FieldValue::Bytes(b) => Ok(b.clone()),
        FieldValue::Text(s) => parse_numeric_text(field, s),
    }
}

fn parse_numeric_text(field: &'static str, text: &str) -> TxResult<Vec<u8>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    // Hex is decoded byte-wise, so it has no width limit
    if has_0x_prefix(text) {
        return decode_hex_padded(&text[2..])
            .map_err(|e| TxError::invalid_field(field, format!("{}: {}", text, e)));
    }

    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TxError::invalid_field(
            field,
            format!("'{}' is not a non-negative integer", text),
        ));
    }

    let n = U256::from_dec_str(text)
        .map_err(|e| TxError::invalid_field(field, format!("{}: {:?}", text, e)))?;
    Ok(u256_bytes(&n))
}

/// Text fields: lowercase `0x`-hex strings are decoded, anything else is UTF-8
fn text_bytes(field: &'static str, text: &str) -> TxResult<Vec<u8>> {
    match text.strip_prefix("0x") {
        Some(digits) if digits.bytes().all(|b| b.is_ascii_hexdigit()) => {
            decode_hex_padded(digits).map_err(|e| TxError::invalid_field(field, e.to_string()))
        }
        _ => Ok(text.as_bytes().to_vec()),
    }
}

fn u256_bytes(n: &U256) -> Vec<u8> {
    let mut out = [0u8; 32];
    n.to_big_endian(&mut out);
    out.to_vec()
}

pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn pad_left(field: &'static str, bytes: Vec<u8>, length: usize) -> TxResult<Vec<u8>> {
    if bytes.len() > length {
        return Err(TxError::FieldTooLong {
            field,
            max: length,
            actual: bytes.len(),
        });
    }
    let mut padded = vec![0u8; length - bytes.len()];
    padded.extend_from_slice(&bytes);
    Ok(padded)
}

/// `0x` + minimal hex, or the empty string when there are no bytes
pub fn to_hex_str(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        String::new()
    } else {
        format!("0x{}", hex::encode(bytes))
    }
}

/// Base-10 rendering of a numeric field
pub fn to_decimal_str(field: &'static str, value: &FieldValue) -> TxResult<String> {
    let bytes = to_raw(field, RawField::Numeric(value), None)?;
    if bytes.len() > 32 {
        return Err(TxError::invalid_field(field, "value exceeds 256 bits"));
    }
    Ok(U256::from_big_endian(&bytes).to_string())
}

/// Read a numeric field as `u32`
pub fn to_u32(field: &'static str, value: &FieldValue) -> TxResult<u32> {
    let bytes = to_raw(field, RawField::Numeric(value), None)?;
    if bytes.len() > 4 {
        return Err(TxError::invalid_field(field, "value exceeds 32 bits"));
    }
    Ok(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
}

/// Accepts `v` as a JSON number or a decimal/hex string
pub(crate) fn deserialize_v<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match Option::<FieldValue>::deserialize(deserializer)? {
        Some(value) => to_u32("v", &value).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(value: FieldValue) -> TxResult<Vec<u8>> {
        to_raw("amount", RawField::Numeric(&value), None)
    }

    #[test]
    fn test_zero_is_empty_in_every_form() {
        assert_eq!(numeric(FieldValue::Int(0)).unwrap(), Vec::<u8>::new());
        assert_eq!(numeric(FieldValue::from("0")).unwrap(), Vec::<u8>::new());
        assert_eq!(numeric(FieldValue::from("0x0")).unwrap(), Vec::<u8>::new());
        assert_eq!(numeric(FieldValue::Big(U256::zero())).unwrap(), Vec::<u8>::new());
        assert_eq!(numeric(FieldValue::Bytes(vec![0, 0])).unwrap(), Vec::<u8>::new());
        assert_eq!(numeric(FieldValue::from("")).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_numbers_are_not_ascii() {
        assert_eq!(numeric(FieldValue::from("16")).unwrap(), vec![0x10]);
        assert_eq!(numeric(FieldValue::from("0x10")).unwrap(), vec![0x10]);
        assert_eq!(numeric(FieldValue::Int(16)).unwrap(), vec![0x10]);
        assert_eq!(
            numeric(FieldValue::from("3000000000")).unwrap(),
            vec![0xb2, 0xd0, 0x5e, 0x00]
        );
    }

    #[test]
    fn test_invalid_numeric_text() {
        for bad in ["-1", "1.5", "abc", "0xzz"] {
            let err = numeric(FieldValue::from(bad)).unwrap_err();
            assert!(matches!(err, TxError::InvalidFieldValue { field: "amount", .. }), "{}", bad);
        }
    }

    #[test]
    fn test_decimal_overflow_rejected() {
        let too_big = "1".repeat(80);
        assert!(numeric(FieldValue::from(too_big.as_str())).is_err());
    }

    #[test]
    fn test_long_hex_is_unbounded() {
        let data = format!("0x00{}", "ab".repeat(40));
        let bytes = to_raw("data", RawField::Numeric(&FieldValue::from(data.as_str())), None).unwrap();
        assert_eq!(bytes, vec![0xab; 40]);
    }

    #[test]
    fn test_fixed_length_address() {
        let padded = to_raw("to", RawField::Address("0x01"), Some(20)).unwrap();
        assert_eq!(padded.len(), 20);
        assert_eq!(padded[19], 0x01);

        let empty = to_raw("to", RawField::Address(""), Some(20)).unwrap();
        assert_eq!(empty, vec![0u8; 20]);

        let long = format!("0x{}", "11".repeat(21));
        let err = to_raw("to", RawField::Address(&long), Some(20)).unwrap_err();
        assert_eq!(
            err,
            TxError::FieldTooLong {
                field: "to",
                max: 20,
                actual: 21
            }
        );
    }

    #[test]
    fn test_text_fields() {
        assert_eq!(to_raw("message", RawField::Text("hi"), None).unwrap(), b"hi".to_vec());
        assert_eq!(to_raw("message", RawField::Text("0x0102"), None).unwrap(), vec![1, 2]);
        assert_eq!(to_raw("message", RawField::Text("0xhello"), None).unwrap(), b"0xhello".to_vec());
        assert_eq!(to_raw("message", RawField::Text(""), None).unwrap(), Vec::<u8>::new());
        // only a lowercase prefix marks hex text
        assert_eq!(to_raw("message", RawField::Text("0XAB"), None).unwrap(), b"0XAB".to_vec());
        assert_eq!(to_raw("toName", RawField::Text("0Xab"), None).unwrap(), b"0Xab".to_vec());
    }

    #[test]
    fn test_uint_trimmed() {
        assert_eq!(to_raw("type", RawField::Uint(0), None).unwrap(), Vec::<u8>::new());
        assert_eq!(to_raw("chainId", RawField::Uint(100), None).unwrap(), vec![100]);
    }

    #[test]
    fn test_render_helpers() {
        assert_eq!(to_hex_str(&[]), "");
        assert_eq!(to_hex_str(&[0x01, 0x05]), "0x0105");
        assert_eq!(to_decimal_str("gasPrice", &FieldValue::from("0x10")).unwrap(), "16");
        assert_eq!(to_u32("v", &FieldValue::from("0x01050064")).unwrap(), 0x01050064);
        assert!(to_u32("v", &FieldValue::from("0x0100000000")).is_err());
    }
}
