//! Contract error model.

use thiserror::Error;

/// Result type used across the contract layer.
pub type ContractResult<T> = Result<T, ContractError>;

/// Contract-level error.
///
/// Raised when a value does not fit the shared vocabulary or envelope shape.
/// Delivery and persistence failures belong to the services that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// A value is not a member of a closed vocabulary (module, name, channel, ...).
    #[error("unknown {field}: {value:?}")]
    UnknownValue { field: &'static str, value: String },

    /// The `kind` discriminant does not match the envelope being decoded.
    #[error("kind mismatch: expected {expected:?}, found {found:?}")]
    KindMismatch { expected: &'static str, found: String },

    /// A required field is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// The payload does not fit the shape registered for its name.
    #[error("invalid payload for {name}: {reason}")]
    InvalidPayload { name: String, reason: String },

    /// An identifier was invalid (e.g. blank).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The input could not be read as an envelope at all.
    #[error("malformed envelope: {0}")]
    Malformed(String),
}

impl ContractError {
    pub fn unknown_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            field,
            value: value.into(),
        }
    }

    pub fn kind_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        Self::KindMismatch {
            expected,
            found: found.into(),
        }
    }

    pub fn invalid_payload(name: impl Into<String>, reason: impl core::fmt::Display) -> Self {
        Self::InvalidPayload {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}
