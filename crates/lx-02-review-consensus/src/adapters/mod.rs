//! Adapters for review consensus.
//!
//! - dictionary: outbound ports over `DictionaryStore`

pub mod dictionary;
