//! # Production Storage Adapters
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature to persist the dictionary:
//!
//! ```toml
//! node-runtime = { path = "...", features = ["rocksdb"] }
//! ```
//!
//! Without it the node runs on `InMemoryKVStore` and loses its data on exit.

pub mod lock;

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

pub use lock::{DatabaseLock, LockError};

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

// Re-export in-memory adapter for testing
pub use lx_01_dictionary_storage::InMemoryKVStore;
