//! Row codec: bincode over serde.

use super::errors::{StorageError, StorageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a row for storage.
pub fn encode<T: Serialize>(row: &T) -> StorageResult<Vec<u8>> {
    bincode::serialize(row).map_err(|e| StorageError::Serialization {
        message: e.to_string(),
    })
}

/// Decode a stored row. Undecodable bytes are reported as corruption of `key`.
pub fn decode<T: DeserializeOwned>(key: &[u8], bytes: &[u8]) -> StorageResult<T> {
    bincode::deserialize(bytes).map_err(|e| StorageError::Corruption {
        key: String::from_utf8_lossy(key).into_owned(),
        message: e.to_string(),
    })
}

/// Encode a sequence value.
pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Decode a sequence value.
pub fn decode_u64(key: &[u8], bytes: &[u8]) -> StorageResult<u64> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| StorageError::Corruption {
        key: String::from_utf8_lossy(key).into_owned(),
        message: format!("expected 8 bytes, got {}", bytes.len()),
    })?;
    Ok(u64::from_be_bytes(raw))
}
