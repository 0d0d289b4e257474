//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Called with the process-wide critical section held for the whole job.

use crate::error::LedgerResult;
use shared_types::{
    ContribEntry, RankingBoard, RankingRow, Review, ReviewId, ReviewStatus, Translation,
    TranslationId, UserId, Vote, VoteTarget, Word, WordId,
};

/// Everything the ledger jobs read and write.
pub trait LedgerStore: Send {
    /// Up to `limit` translations with id above `after`, ascending.
    fn translations_after(
        &self,
        after: TranslationId,
        limit: usize,
    ) -> LedgerResult<Vec<Translation>>;

    /// All translations in ascending id order.
    fn translations(&self) -> LedgerResult<Vec<Translation>>;

    /// Up to `limit` reviews in `status` with id above `after`, ascending.
    fn reviews_after(
        &self,
        after: ReviewId,
        status: ReviewStatus,
        limit: usize,
    ) -> LedgerResult<Vec<Review>>;

    fn votes(&self, target: VoteTarget, item_id: u64) -> LedgerResult<Vec<Vote>>;

    fn word_by_id(&self, word_id: WordId) -> LedgerResult<Option<Word>>;

    fn display_name(&self, user_id: UserId) -> LedgerResult<Option<String>>;

    /// Translation id of the latest entry that has one, or 0.
    fn latest_contrib_translation_id(&self) -> LedgerResult<TranslationId>;

    /// Review id of the latest entry that has one, or 0.
    fn latest_contrib_review_id(&self) -> LedgerResult<ReviewId>;

    /// Append in order, all or nothing. Returns the number appended.
    fn append_contribs(&mut self, entries: Vec<ContribEntry>) -> LedgerResult<usize>;

    fn contribs(&self) -> LedgerResult<Vec<ContribEntry>>;

    /// Replace a board's contents, all or nothing.
    fn replace_ranking(&mut self, board: RankingBoard, rows: &[RankingRow]) -> LedgerResult<()>;

    fn ranking(&self, board: RankingBoard, limit: usize) -> LedgerResult<Vec<RankingRow>>;
}
