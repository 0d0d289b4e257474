//! Ports for the dictionary store.

pub mod outbound;

pub use outbound::{BatchOperation, InMemoryKVStore, KeyValueStore, SystemTimeSource, TimeSource};
