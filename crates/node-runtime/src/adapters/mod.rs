//! # Adapters
//!
//! Concrete implementations of the outbound ports the node needs:
//! key-value storage backends, the data directory lock and identity
//! resolution.

pub mod identity;
pub mod storage;

pub use identity::{parse_bearer, IdentityResolver, StaticTokenResolver};
pub use storage::{DatabaseLock, InMemoryKVStore, LockError};

#[cfg(feature = "rocksdb")]
pub use storage::{RocksDbConfig, RocksDbStore};
