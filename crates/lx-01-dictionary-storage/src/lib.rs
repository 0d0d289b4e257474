//! # Dictionary Storage (lx-01)
//!
//! Persistence for every table the consensus and ledger subsystems touch,
//! expressed as typed operations over an abstract key-value store.
//!
//! ## Tables
//!
//! ```text
//! reviews ──────────┐
//! review_votes ─────┤  (review_id, voter) unique
//! translations ─────┤  (source, target) unique
//! translation_votes ┤  (translation_id, voter) unique
//! contribs ─────────┤  append-only, monotonically increasing id
//! ranking boards ───┘  fully replaced per aggregation run
//! ```
//!
//! Words and users are collaborator tables: read by consensus and ranking,
//! written only by seeding and import paths.
//!
//! ## Atomicity
//!
//! Multi-row mutations (promotion, ledger append, board replacement) are a
//! single `atomic_batch_write`: all or nothing.
//!
//! ## Usage
//!
//! ```ignore
//! use lx_01_dictionary_storage::{DictionaryStore, NewReview};
//!
//! let mut store = DictionaryStore::in_memory();
//! let review = store.insert_review(NewReview { .. })?;
//! ```

pub mod domain;
pub mod ports;
pub mod store;

pub use domain::{KVStoreError, KeyPrefix, StorageError, StorageResult};
pub use ports::outbound::{
    BatchOperation, InMemoryKVStore, KeyValueStore, SystemTimeSource, TimeSource,
};
pub use store::{DictionaryStore, NewReview, NewTranslation};
