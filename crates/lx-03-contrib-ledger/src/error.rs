//! Error types for the contribution ledger

use lx_01_dictionary_storage::StorageError;
use shared_types::ContribId;
use thiserror::Error;

/// Contribution ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Entry with both or neither of translation/review id set
    #[error("Malformed ledger entry {contrib_id}")]
    MalformedEntry { contrib_id: ContribId },

    /// Storage failure; the ledger and boards keep their prior contents
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
