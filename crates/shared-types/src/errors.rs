//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// A textual enum value did not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Errors related to scheduler trigger verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// Timestamp outside valid window.
    #[error("Timestamp out of range: {timestamp} not within valid window of {now}")]
    TimestampOutOfRange { timestamp: u64, now: u64 },

    /// Signature is not valid hex or has the wrong length.
    #[error("Malformed signature")]
    MalformedSignature,

    /// Invalid signature.
    #[error("Invalid signature")]
    InvalidSignature,
}
