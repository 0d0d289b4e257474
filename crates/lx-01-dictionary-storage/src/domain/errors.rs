//! # Domain Errors
//!
//! Error types for the dictionary storage layer.
//!
//! ## Design Principles
//!
//! - Raw key-value failures (`KVStoreError`) are kept apart from typed table
//!   failures (`StorageError`)
//! - A row that fails to decode is corruption, never silently skipped
//! - No panics in storage logic (use Result instead)

use std::fmt;
use thiserror::Error;

/// Errors raised by typed table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A uniqueness constraint would be violated (composite vote key,
    /// translation pair).
    #[error("Conflict: {what} already exists")]
    Conflict { what: String },

    /// A row the operation depends on is missing.
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// Stored bytes could not be decoded into a row.
    #[error("Corrupted row under key {key}: {message}")]
    Corruption { key: String, message: String },

    /// A row could not be encoded.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Underlying key-value store failure.
    #[error("Database error: {message}")]
    Database { message: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KVStoreError {
    /// I/O error during read/write.
    IOError { message: String },
    /// Data corruption in the store.
    CorruptionError { message: String },
}

impl fmt::Display for KVStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KVStoreError::IOError { message } => write!(f, "KV store I/O error: {}", message),
            KVStoreError::CorruptionError { message } => {
                write!(f, "KV store corruption: {}", message)
            }
        }
    }
}

impl std::error::Error for KVStoreError {}

impl From<KVStoreError> for StorageError {
    fn from(err: KVStoreError) -> Self {
        StorageError::Database {
            message: err.to_string(),
        }
    }
}
