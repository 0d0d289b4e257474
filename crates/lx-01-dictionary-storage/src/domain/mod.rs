//! Domain module for dictionary storage
//!
//! - errors: typed table and raw KV failures
//! - keys: prefix layout of every table
//! - codec: bincode row encoding

pub mod codec;
pub mod errors;
pub mod keys;

pub use errors::{KVStoreError, StorageError, StorageResult};
pub use keys::KeyPrefix;
