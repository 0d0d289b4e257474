//! Outbound ports implemented over the dictionary store.

use crate::error::{ConsensusError, ConsensusResult};
use crate::ports::outbound::{ReviewStore, TranslationStore, UserDirectory, VoteLedger, WordStore};
use lx_01_dictionary_storage::{
    DictionaryStore, KeyValueStore, NewReview, NewTranslation, StorageError,
};
use shared_types::{
    Review, ReviewId, ReviewStatus, Translation, UserId, Vote, VoteTarget, VoteValue, Word,
    WordId,
};

impl<KV: KeyValueStore> WordStore for DictionaryStore<KV> {
    fn word_by_id(&self, word_id: WordId) -> ConsensusResult<Option<Word>> {
        Ok(DictionaryStore::word_by_id(self, word_id)?)
    }
}

impl<KV: KeyValueStore> UserDirectory for DictionaryStore<KV> {
    fn display_name(&self, user_id: UserId) -> ConsensusResult<Option<String>> {
        Ok(self.user_by_id(user_id)?.map(|user| user.display_name))
    }
}

impl<KV: KeyValueStore> TranslationStore for DictionaryStore<KV> {
    fn existing_translation_count(
        &self,
        source_word_id: WordId,
        target_word_id: WordId,
    ) -> ConsensusResult<u64> {
        Ok(self.translation_count(source_word_id, target_word_id)?)
    }

    fn translations_for_source(
        &self,
        source_word_id: WordId,
    ) -> ConsensusResult<Vec<Translation>> {
        Ok(DictionaryStore::translations_for_source(self, source_word_id)?)
    }

    fn commit_promotion(
        &mut self,
        review_id: ReviewId,
        translation: NewTranslation,
        votes: &[Vote],
    ) -> ConsensusResult<Translation> {
        let (source_word_id, target_word_id) =
            (translation.source_word_id, translation.target_word_id);
        DictionaryStore::commit_promotion(self, review_id, translation, votes).map_err(|e| match e {
            StorageError::Conflict { .. } => ConsensusError::DuplicateTranslation {
                source_word_id,
                target_word_id,
            },
            StorageError::NotFound { .. } => ConsensusError::NoReview { review_id },
            other => other.into(),
        })
    }
}

impl<KV: KeyValueStore> ReviewStore for DictionaryStore<KV> {
    fn insert_review(&mut self, review: NewReview) -> ConsensusResult<Review> {
        Ok(DictionaryStore::insert_review(self, review)?)
    }

    fn review_by_id(&self, review_id: ReviewId) -> ConsensusResult<Option<Review>> {
        Ok(DictionaryStore::review_by_id(self, review_id)?)
    }

    fn set_review_status(
        &mut self,
        review_id: ReviewId,
        status: ReviewStatus,
    ) -> ConsensusResult<bool> {
        Ok(DictionaryStore::set_review_status(self, review_id, status)?)
    }

    fn reviews(&self) -> ConsensusResult<Vec<Review>> {
        Ok(DictionaryStore::reviews(self)?)
    }
}

impl<KV: KeyValueStore> VoteLedger for DictionaryStore<KV> {
    fn cast_vote(&mut self, target: VoteTarget, vote: Vote) -> ConsensusResult<()> {
        let (review_id, voter) = (vote.item_id, vote.voter_user_id);
        self.insert_vote(target, &vote).map_err(|e| match e {
            StorageError::Conflict { .. } => ConsensusError::DuplicateVote { review_id, voter },
            other => other.into(),
        })
    }

    fn retract_vote(
        &mut self,
        target: VoteTarget,
        item_id: u64,
        voter: UserId,
        value: VoteValue,
    ) -> ConsensusResult<()> {
        match self.vote(target, item_id, voter)? {
            Some(held) if held.value == value => {
                self.delete_vote(target, item_id, voter)?;
                Ok(())
            }
            _ => Err(ConsensusError::VoteNotFound {
                review_id: item_id,
                voter,
            }),
        }
    }

    fn votes(&self, target: VoteTarget, item_id: u64) -> ConsensusResult<Vec<Vote>> {
        Ok(DictionaryStore::votes(self, target, item_id)?)
    }
}
