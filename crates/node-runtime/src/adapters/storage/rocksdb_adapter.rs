//! # RocksDB Storage Adapter
//!
//! RocksDB implementation of the dictionary `KeyValueStore` port.
//!
//! ## Features
//!
//! - Atomic batch writes (WriteBatch) for promotions and ledger appends
//! - Snappy compression
//! - Bloom filters for point lookups on vote and pair keys
//! - Ordered prefix iteration matching the in-memory store
//!
//! Every table lives in the default column family; tables are separated by
//! key prefix.

use lx_01_dictionary_storage::{BatchOperation, KVStoreError, KeyValueStore};
use parking_lot::RwLock;
use rocksdb::{IteratorMode, Options, WriteBatch, DB};
use std::path::Path;
use std::sync::Arc;

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/rocksdb".to_string(),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Config under `data_dir` with default tuning.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("rocksdb").to_string_lossy().to_string(),
            ..Default::default()
        }
    }

    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed key-value store
pub struct RocksDbStore {
    db: Arc<RwLock<DB>>,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create a RocksDB database
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, &config.path).map_err(|e| KVStoreError::IOError {
            message: format!("Failed to open RocksDB: {}", e),
        })?;

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
            config,
        })
    }

    fn write_opts(&self) -> rocksdb::WriteOptions {
        let mut write_opts = rocksdb::WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        let db = self.db.read();
        db.get(key).map_err(|e| KVStoreError::IOError {
            message: format!("RocksDB get failed: {}", e),
        })
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let db = self.db.write();
        db.put_opt(key, value, &self.write_opts())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB put failed: {}", e),
            })
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        let db = self.db.write();
        db.delete_opt(key, &self.write_opts())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB delete failed: {}", e),
            })
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let db = self.db.write();
        let mut batch = WriteBatch::default();

        for op in operations {
            match op {
                BatchOperation::Put { key, value } => batch.put(&key, &value),
                BatchOperation::Delete { key } => batch.delete(&key),
            }
        }

        db.write_opt(batch, &self.write_opts())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB batch write failed: {}", e),
            })
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        let db = self.db.read();
        db.get_pinned(key)
            .map(|v| v.is_some())
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB exists check failed: {}", e),
            })
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        let db = self.db.read();
        let mut results = Vec::new();

        for item in db.iterator(IteratorMode::From(prefix, rocksdb::Direction::Forward)) {
            let (key, value) = item.map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB scan failed: {}", e),
            })?;
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.to_vec(), value.to_vec()));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lx_01_dictionary_storage::{DictionaryStore, NewReview};
    use shared_types::ReviewStatus;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> RocksDbStore {
        let path = dir.path().join("db").to_string_lossy().to_string();
        RocksDbStore::open(RocksDbConfig::for_testing(path)).unwrap()
    }

    #[test]
    fn test_rocksdb_batch_and_scan() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);

        store
            .atomic_batch_write(vec![
                BatchOperation::put(b"r:2".to_vec(), b"b".to_vec()),
                BatchOperation::put(b"r:1".to_vec(), b"a".to_vec()),
                BatchOperation::put(b"t:1".to_vec(), b"x".to_vec()),
            ])
            .unwrap();
        store.delete(b"r:2").unwrap();

        let rows = store.prefix_scan(b"r:").unwrap();
        assert_eq!(rows, vec![(b"r:1".to_vec(), b"a".to_vec())]);
        assert!(store.exists(b"t:1").unwrap());
    }

    #[test]
    fn test_dictionary_rows_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let review_id = {
            let mut dict = DictionaryStore::new(open(&temp_dir));
            dict.insert_review(NewReview {
                source_word_id: 1,
                target_word_id: 2,
                reference: "ref".into(),
                author_user_id: 3,
                created_at: 4,
            })
            .unwrap()
            .review_id
        };

        let dict = DictionaryStore::new(open(&temp_dir));
        let review = dict.review_by_id(review_id).unwrap().unwrap();
        assert_eq!(review.status, ReviewStatus::New);
        assert_eq!(review.reference, "ref");
    }
}
