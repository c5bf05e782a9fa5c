//! Unified error types for the transaction layer
//!
//! Every fallible operation returns [`TxResult`]. Failures are never retried;
//! they propagate synchronously to the caller.

use serde::{Deserialize, Serialize};

/// Main error type for all transaction operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TxError {
    /// A fixed-length field normalized to more bytes than it may hold
    #[error("The field {field} must be less than {max} bytes, got {actual}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Invalid value for field {field}: {reason}")]
    InvalidFieldValue { field: &'static str, reason: String },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl TxError {
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            field,
            reason: reason.into(),
        }
    }

    /// Category used in machine-readable error reports
    pub fn code(&self) -> ErrorCode {
        match self {
            TxError::FieldTooLong { .. } => ErrorCode::FieldTooLong,
            TxError::InvalidFieldValue { .. } => ErrorCode::InvalidFieldValue,
            TxError::InvalidSignature(_) => ErrorCode::InvalidSignature,
            TxError::InvalidPrivateKey(_) => ErrorCode::InvalidPrivateKey,
            TxError::InvalidAddress(_) => ErrorCode::InvalidAddress,
            TxError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            TxError::Json(_) => ErrorCode::JsonError,
            TxError::Io(_) => ErrorCode::Internal,
        }
    }
}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Encoding errors
    FieldTooLong,
    InvalidFieldValue,
    InvalidAddress,

    // Crypto errors
    InvalidSignature,
    InvalidPrivateKey,

    // Input errors
    InvalidConfig,
    JsonError,

    Internal,
}

/// Result type alias for transaction operations
pub type TxResult<T> = Result<T, TxError>;

impl From<serde_json::Error> for TxError {
    fn from(e: serde_json::Error) -> Self {
        TxError::Json(e.to_string())
    }
}

impl From<hex::FromHexError> for TxError {
    fn from(e: hex::FromHexError) -> Self {
        TxError::InvalidFieldValue {
            field: "hex",
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for TxError {
    fn from(e: std::io::Error) -> Self {
        TxError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serialization() {
        let err = TxError::FieldTooLong {
            field: "to",
            max: 20,
            actual: 21,
        };

        let json = serde_json::to_string(&err.code()).unwrap();
        assert_eq!(json, "\"field_too_long\"");
        assert_eq!(err.to_string(), "The field to must be less than 20 bytes, got 21");
    }

    #[test]
    fn test_invalid_field_helper() {
        let err = TxError::invalid_field("amount", "negative");
        assert_eq!(err.code(), ErrorCode::InvalidFieldValue);
        assert!(err.to_string().contains("amount"));
    }
}
