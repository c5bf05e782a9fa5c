//! JSON Projection
//!
//! The wire/display form of a transaction. Numbers are base-10 strings,
//! `v`/`r`/`s`/`data` are minimal `0x` hex, and empty optional fields are
//! left out entirely.

use super::normalize::{to_decimal_str, to_hex_str, to_raw, to_u32, RawField};
use super::transaction::Transaction;
use super::types::{FieldValue, TxConfig};
use crate::address::{has_0x_prefix, ADDRESS_LENGTH};
use crate::error::TxResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxJson {
    pub gas_price: String,
    pub gas_limit: String,
    pub amount: String,
    pub expiration_time: String,
    pub v: String,
    pub r: String,
    pub s: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn to_json(tx: &Transaction) -> TxResult<TxJson> {
    let to = if has_0x_prefix(&tx.to) {
        let raw = to_raw("to", RawField::Address(&tx.to), Some(ADDRESS_LENGTH))?;
        Some(to_hex_str(&raw))
    } else if tx.to.is_empty() {
        None
    } else {
        Some(tx.to.clone())
    };

    let data = if tx.data.is_blank() {
        None
    } else {
        let hex = to_hex_str(&to_raw("data", RawField::Numeric(&tx.data), None)?);
        (!hex.is_empty()).then_some(hex)
    };

    Ok(TxJson {
        gas_price: to_decimal_str("gasPrice", &tx.gas_price)?,
        gas_limit: to_decimal_str("gasLimit", &tx.gas_limit)?,
        amount: to_decimal_str("amount", &tx.amount)?,
        expiration_time: to_decimal_str("expirationTime", &tx.expiration_time)?,
        v: to_hex_str(&to_raw("v", RawField::Uint(tx.v as u64), None)?),
        r: to_hex_str(&to_raw("r", RawField::Numeric(&tx.r), None)?),
        s: to_hex_str(&to_raw("s", RawField::Numeric(&tx.s), None)?),
        to,
        to_name: (!tx.to_name.is_empty()).then(|| tx.to_name.clone()),
        data,
        message: (!tx.message.is_empty()).then(|| tx.message.clone()),
    })
}

impl TxJson {
    /// Turn the projection back into construction options.
    ///
    /// An empty `v` means a packed value of zero, not "absent".
    pub fn into_config(self) -> TxResult<TxConfig> {
        let v = if self.v.is_empty() {
            0
        } else {
            to_u32("v", &FieldValue::Text(self.v))?
        };

        Ok(TxConfig {
            to: self.to,
            to_name: self.to_name,
            gas_price: Some(FieldValue::Text(self.gas_price)),
            gas_limit: Some(FieldValue::Text(self.gas_limit)),
            amount: Some(FieldValue::Text(self.amount)),
            data: self.data.map(FieldValue::Text),
            expiration_time: Some(FieldValue::Text(self.expiration_time)),
            message: self.message,
            r: Some(FieldValue::Text(self.r)),
            s: Some(FieldValue::Text(self.s)),
            v: Some(v),
            ..TxConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::chain_config::ChainConfig;

    fn sample() -> Transaction {
        Transaction::new(
            crate::tx::TxConfig::new()
                .tx_type(1)
                .version(2)
                .chain_id(100)
                .to("0x1")
                .gas_price("0x10")
                .amount(1_000_000_000_000_000_000u64)
                .expiration_time(1_544_584_596u64),
            &ChainConfig::default(),
        )
    }

    #[test]
    fn test_projection_fields() {
        let json = to_json(&sample()).unwrap();

        assert_eq!(json.gas_price, "16");
        assert_eq!(json.gas_limit, "2000000");
        assert_eq!(json.amount, "1000000000000000000");
        assert_eq!(json.expiration_time, "1544584596");
        assert_eq!(json.v, "0x01040064");
        assert_eq!(json.r, "");
        assert_eq!(json.s, "");
        assert_eq!(json.to, Some(format!("0x{}01", "00".repeat(19))));
    }

    #[test]
    fn test_empty_optional_keys_omitted() {
        let rendered = serde_json::to_value(to_json(&sample()).unwrap()).unwrap();
        let object = rendered.as_object().unwrap();

        assert!(object.contains_key("to"));
        assert!(!object.contains_key("toName"));
        assert!(!object.contains_key("data"));
        assert!(!object.contains_key("message"));
    }

    #[test]
    fn test_lemo_recipient_kept_verbatim() {
        let mut tx = sample();
        tx.to = "Lemo83GN72GYH2NZ8BA729Z9TCT7KQ5FC3CR6DJG".to_string();
        tx.data = FieldValue::from("0x00ff");
        tx.message = "hello".to_string();

        let json = to_json(&tx).unwrap();
        assert_eq!(json.to.as_deref(), Some("Lemo83GN72GYH2NZ8BA729Z9TCT7KQ5FC3CR6DJG"));
        assert_eq!(json.data.as_deref(), Some("0xff"));
        assert_eq!(json.message.as_deref(), Some("hello"));
    }

    #[test]
    fn test_into_config_preserves_v() {
        let tx = sample();
        let config = to_json(&tx).unwrap().into_config().unwrap();
        let rebuilt = Transaction::new(config, &ChainConfig::new(7));

        assert_eq!(rebuilt.v, tx.v);
        assert_eq!(rebuilt.chain_id, 100);
        assert_eq!(rebuilt.signing_hash().unwrap(), tx.signing_hash().unwrap());
    }
}
