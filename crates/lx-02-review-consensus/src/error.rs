//! Error types for the review consensus subsystem

use lx_01_dictionary_storage::StorageError;
use shared_types::{ReviewId, UserId, WordId};
use thiserror::Error;

/// Review consensus errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusError {
    /// Voter already holds a vote (of either value) on the item
    #[error("User {voter} already voted on review {review_id}")]
    DuplicateVote { review_id: ReviewId, voter: UserId },

    /// A translation for the exact pair already exists
    #[error("Translation {source_word_id} -> {target_word_id} already exists")]
    DuplicateTranslation {
        source_word_id: WordId,
        target_word_id: WordId,
    },

    /// Retraction of a vote the voter does not hold
    #[error("User {voter} holds no such vote on review {review_id}")]
    VoteNotFound { review_id: ReviewId, voter: UserId },

    /// Referenced word does not exist
    #[error("Word not found: {word_id}")]
    WordNotFound { word_id: WordId },

    /// Source word is not in the canonical source language
    #[error("Source word {word_id} has language {lang:?}, expected {expected:?}")]
    InvalidSource {
        word_id: WordId,
        lang: String,
        expected: String,
    },

    /// Target word is in the canonical source language
    #[error("Target word {word_id} must not be in language {lang:?}")]
    InvalidTarget { word_id: WordId, lang: String },

    /// Review is unknown, not open, or not owned by the caller
    #[error("No open review {review_id}")]
    NoReview { review_id: ReviewId },

    /// Malformed listing query
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Storage failure; nothing was partially applied
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ConsensusError {
    /// Machine-readable reason string reported to API callers.
    pub fn reason(&self) -> &'static str {
        match self {
            ConsensusError::DuplicateVote { .. } | ConsensusError::DuplicateTranslation { .. } => {
                "duplicate"
            }
            ConsensusError::VoteNotFound { .. } | ConsensusError::WordNotFound { .. } => {
                "not found"
            }
            ConsensusError::InvalidSource { .. } => "invalid_src",
            ConsensusError::InvalidTarget { .. } => "invalid_dst",
            ConsensusError::NoReview { .. } => "no review",
            ConsensusError::InvalidRequest { .. } => "invalid request",
            ConsensusError::Storage(_) => "internal error",
        }
    }

    /// False for internal failures that must be reported generically.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ConsensusError::Storage(_))
    }
}

/// Result type for consensus operations
pub type ConsensusResult<T> = Result<T, ConsensusError>;
