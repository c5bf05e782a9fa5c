//! Chain Configuration
//!
//! Network defaults used when a transaction is built without explicit
//! chain id, protocol version or expiration time.

use crate::error::{TxError, TxResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// LemoChain mainnet
pub const DEFAULT_CHAIN_ID: u16 = 1;
pub const DEFAULT_TX_VERSION: u8 = 1;
/// Half an hour
pub const DEFAULT_TTL_SECS: u64 = 30 * 60;

/// Largest protocol version that fits the 7-bit v sub-field
pub const MAX_TX_VERSION: u8 = 127;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChainConfig {
    pub chain_id: u16,
    pub tx_version: u8,
    /// Seconds added to "now" for the default expiration time
    pub ttl_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            tx_version: DEFAULT_TX_VERSION,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

impl ChainConfig {
    pub fn new(chain_id: u16) -> Self {
        Self {
            chain_id,
            ..Self::default()
        }
    }

    pub fn with_tx_version(mut self, version: u8) -> Self {
        self.tx_version = version;
        self
    }

    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Parse a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> TxResult<Self> {
        let config: ChainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> TxResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> TxResult<()> {
        if self.tx_version > MAX_TX_VERSION {
            return Err(TxError::InvalidConfig(format!(
                "txVersion {} does not fit in 7 bits",
                self.tx_version
            )));
        }
        if self.ttl_secs == 0 {
            return Err(TxError::InvalidConfig("ttlSecs must be positive".to_string()));
        }
        Ok(())
    }

    /// Default expiration time: now + ttl, in epoch seconds
    pub fn default_expiration(&self) -> u64 {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        now.saturating_add(self.ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChainConfig::default();
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.tx_version, 1);
        assert_eq!(config.ttl_secs, 1800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = ChainConfig::from_json(r#"{"chainId": 100}"#).unwrap();
        assert_eq!(config, ChainConfig::new(100));
    }

    #[test]
    fn test_invalid_version_rejected() {
        let err = ChainConfig::from_json(r#"{"txVersion": 200}"#).unwrap_err();
        assert!(matches!(err, TxError::InvalidConfig(_)));

        let zero_ttl = ChainConfig::default().with_ttl_secs(0);
        assert!(zero_ttl.validate().is_err());
    }

    #[test]
    fn test_default_expiration_in_future() {
        let config = ChainConfig::default();
        let now = chrono::Utc::now().timestamp() as u64;
        let expiration = config.default_expiration();
        assert!(expiration >= now + 1800);
        assert!(expiration <= now + 1800 + 5);
    }
}
