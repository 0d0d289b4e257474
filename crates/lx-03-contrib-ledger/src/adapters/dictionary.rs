//! `LedgerStore` over the dictionary store.

use crate::error::LedgerResult;
use crate::ports::outbound::LedgerStore;
use lx_01_dictionary_storage::{DictionaryStore, KeyValueStore};
use shared_types::{
    ContribEntry, RankingBoard, RankingRow, Review, ReviewId, ReviewStatus, Translation,
    TranslationId, UserId, Vote, VoteTarget, Word, WordId,
};

impl<KV: KeyValueStore> LedgerStore for DictionaryStore<KV> {
    fn translations_after(
        &self,
        after: TranslationId,
        limit: usize,
    ) -> LedgerResult<Vec<Translation>> {
        Ok(DictionaryStore::translations_after(self, after, limit)?)
    }

    fn translations(&self) -> LedgerResult<Vec<Translation>> {
        Ok(DictionaryStore::translations(self)?)
    }

    fn reviews_after(
        &self,
        after: ReviewId,
        status: ReviewStatus,
        limit: usize,
    ) -> LedgerResult<Vec<Review>> {
        Ok(DictionaryStore::reviews_after(self, after, status, limit)?)
    }

    fn votes(&self, target: VoteTarget, item_id: u64) -> LedgerResult<Vec<Vote>> {
        Ok(DictionaryStore::votes(self, target, item_id)?)
    }

    fn word_by_id(&self, word_id: WordId) -> LedgerResult<Option<Word>> {
        Ok(DictionaryStore::word_by_id(self, word_id)?)
    }

    fn display_name(&self, user_id: UserId) -> LedgerResult<Option<String>> {
        Ok(self.user_by_id(user_id)?.map(|user| user.display_name))
    }

    fn latest_contrib_translation_id(&self) -> LedgerResult<TranslationId> {
        Ok(DictionaryStore::latest_contrib_translation_id(self)?)
    }

    fn latest_contrib_review_id(&self) -> LedgerResult<ReviewId> {
        Ok(DictionaryStore::latest_contrib_review_id(self)?)
    }

    fn append_contribs(&mut self, entries: Vec<ContribEntry>) -> LedgerResult<usize> {
        Ok(DictionaryStore::append_contribs(self, entries)?.len())
    }

    fn contribs(&self) -> LedgerResult<Vec<ContribEntry>> {
        Ok(DictionaryStore::contribs(self)?)
    }

    fn replace_ranking(&mut self, board: RankingBoard, rows: &[RankingRow]) -> LedgerResult<()> {
        Ok(DictionaryStore::replace_ranking(self, board, rows)?)
    }

    fn ranking(&self, board: RankingBoard, limit: usize) -> LedgerResult<Vec<RankingRow>> {
        Ok(DictionaryStore::ranking(self, board, limit)?)
    }
}
