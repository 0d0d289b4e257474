//! # Outbound Ports (Driven Ports)
//!
//! What the dictionary tables need from the host: an ordered byte store
//! with atomic batches, and a clock.

use crate::domain::errors::KVStoreError;
use shared_types::Timestamp;
use std::collections::BTreeMap;

/// Ordered byte-keyed store backing every dictionary table.
///
/// Implemented by `InMemoryKVStore` here and by `RocksDbStore` in the node.
pub trait KeyValueStore: Send + Sync {
    /// Point read.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Single-row write, for mutations that touch one row.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Apply every operation or none of them. Promotions, ledger appends and
    /// board replacements each go through exactly one call.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// All rows under `prefix`, ascending by key. Table scans rely on the
    /// big-endian id suffix sorting numerically.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;
}

/// One write inside an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Source of `created_at` stamps and ranking windows.
pub trait TimeSource: Send + Sync {
    /// Unix seconds.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        shared_types::current_timestamp()
    }
}

/// In-memory key-value store.
///
/// Backed by a `BTreeMap` so prefix scans come back in key order, matching
/// RocksDB iteration.
#[derive(Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        // Single owner under &mut: applying in order is all-or-nothing.
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        let results = self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_scan_is_ordered_and_bounded() {
        let mut kv = InMemoryKVStore::new();
        kv.put(b"a:2", b"two").unwrap();
        kv.put(b"a:1", b"one").unwrap();
        kv.put(b"b:1", b"other").unwrap();

        let rows = kv.prefix_scan(b"a:").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, b"a:1".to_vec());
        assert_eq!(rows[1].0, b"a:2".to_vec());
    }

    #[test]
    fn test_batch_applies_puts_and_deletes() {
        let mut kv = InMemoryKVStore::new();
        kv.put(b"x", b"1").unwrap();

        kv.atomic_batch_write(vec![
            BatchOperation::put(b"y".to_vec(), b"2".to_vec()),
            BatchOperation::delete(b"x".to_vec()),
        ])
        .unwrap();

        assert!(!kv.exists(b"x").unwrap());
        assert_eq!(kv.get(b"y").unwrap(), Some(b"2".to_vec()));
    }
}
