//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Collaborator operations consumed by the consensus engine. All calls are
//! synchronous and made while the caller holds the process-wide critical
//! section, so implementations need no locking of their own.

use crate::error::ConsensusResult;
use lx_01_dictionary_storage::{NewReview, NewTranslation};
use shared_types::{
    Review, ReviewId, ReviewStatus, Translation, UserId, Vote, VoteTarget, VoteValue, Word,
    WordId,
};

/// Word lookup.
pub trait WordStore {
    fn word_by_id(&self, word_id: WordId) -> ConsensusResult<Option<Word>>;
}

/// User display names.
pub trait UserDirectory {
    fn display_name(&self, user_id: UserId) -> ConsensusResult<Option<String>>;
}

/// Translation reads and the promotion write.
pub trait TranslationStore {
    fn existing_translation_count(
        &self,
        source_word_id: WordId,
        target_word_id: WordId,
    ) -> ConsensusResult<u64>;

    fn translations_for_source(&self, source_word_id: WordId)
        -> ConsensusResult<Vec<Translation>>;

    /// Insert the translation, copy `votes` into its ledger and mark the
    /// review `APPROVED`, all or nothing.
    fn commit_promotion(
        &mut self,
        review_id: ReviewId,
        translation: NewTranslation,
        votes: &[Vote],
    ) -> ConsensusResult<Translation>;
}

/// Review rows and their lifecycle status.
pub trait ReviewStore {
    fn insert_review(&mut self, review: NewReview) -> ConsensusResult<Review>;

    fn review_by_id(&self, review_id: ReviewId) -> ConsensusResult<Option<Review>>;

    /// No-op (returns `false`) if the review is already `DISCARDED`.
    fn set_review_status(&mut self, review_id: ReviewId, status: ReviewStatus)
        -> ConsensusResult<bool>;

    /// All reviews in ascending id order.
    fn reviews(&self) -> ConsensusResult<Vec<Review>>;
}

/// Per-item vote records, one ledger per [`VoteTarget`].
pub trait VoteLedger {
    /// Fails with `DuplicateVote` if the voter holds any vote on the item.
    fn cast_vote(&mut self, target: VoteTarget, vote: Vote) -> ConsensusResult<()>;

    /// Fails with `VoteNotFound` unless the voter holds exactly `value`.
    fn retract_vote(
        &mut self,
        target: VoteTarget,
        item_id: u64,
        voter: UserId,
        value: VoteValue,
    ) -> ConsensusResult<()>;

    fn votes(&self, target: VoteTarget, item_id: u64) -> ConsensusResult<Vec<Vote>>;
}

/// Everything the consensus service needs from storage.
pub trait ConsensusStore:
    WordStore + UserDirectory + TranslationStore + ReviewStore + VoteLedger + Send
{
}

impl<T> ConsensusStore for T where
    T: WordStore + UserDirectory + TranslationStore + ReviewStore + VoteLedger + Send
{
}
