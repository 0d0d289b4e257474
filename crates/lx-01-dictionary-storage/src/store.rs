//! # Dictionary Store
//!
//! Typed tables over a [`KeyValueStore`]. Every multi-row mutation is built
//! as one batch and committed through `atomic_batch_write`, so a promotion
//! or a ledger append is either fully visible or not at all.
//!
//! The store itself does no locking. Callers reach it through
//! `shared_types::ExclusiveStore`, which provides the process-wide critical
//! section.

use crate::domain::codec::{decode, decode_u64, encode, encode_u64};
use crate::domain::errors::{StorageError, StorageResult};
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::{BatchOperation, InMemoryKVStore, KeyValueStore};
use serde::de::DeserializeOwned;
use shared_types::{
    ContribEntry, RankingBoard, RankingRow, Review, ReviewId, ReviewStatus, Timestamp,
    Translation, TranslationId, User, UserId, Vote, VoteTarget, Word, WordId,
};

const SEQ_REVIEWS: &str = "reviews";
const SEQ_TRANSLATIONS: &str = "translations";
const SEQ_CONTRIBS: &str = "contribs";

/// Fields of a review before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub source_word_id: WordId,
    pub target_word_id: WordId,
    pub reference: String,
    pub author_user_id: UserId,
    pub created_at: Timestamp,
}

/// Fields of a translation before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslation {
    pub source_word_id: WordId,
    pub target_word_id: WordId,
    pub reference: String,
    pub author_user_id: UserId,
    pub created_at: Timestamp,
}

/// Typed access to every dictionary table.
pub struct DictionaryStore<KV: KeyValueStore> {
    kv: KV,
}

impl DictionaryStore<InMemoryKVStore> {
    /// Store backed by a fresh in-memory KV store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryKVStore::new())
    }
}

impl<KV: KeyValueStore> DictionaryStore<KV> {
    pub fn new(kv: KV) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &KV {
        &self.kv
    }

    pub fn into_inner(self) -> KV {
        self.kv
    }

    // -------------------------------------------------------------------------
    // Row helpers
    // -------------------------------------------------------------------------

    fn get_row<T: DeserializeOwned>(&self, key: &[u8]) -> StorageResult<Option<T>> {
        match self.kv.get(key)? {
            Some(bytes) => Ok(Some(decode(key, &bytes)?)),
            None => Ok(None),
        }
    }

    fn scan_rows<T: DeserializeOwned>(&self, prefix: &[u8]) -> StorageResult<Vec<T>> {
        self.kv
            .prefix_scan(prefix)?
            .iter()
            .map(|(key, value)| decode(key, value))
            .collect()
    }

    fn last_id(&self, table: &str) -> StorageResult<u64> {
        let key = KeyPrefix::sequence_key(table);
        match self.kv.get(&key)? {
            Some(bytes) => decode_u64(&key, &bytes),
            None => Ok(0),
        }
    }

    fn commit(&mut self, operations: Vec<BatchOperation>) -> StorageResult<()> {
        self.kv.atomic_batch_write(operations)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Words and users (collaborator tables)
    // -------------------------------------------------------------------------

    pub fn put_word(&mut self, word: &Word) -> StorageResult<()> {
        let key = KeyPrefix::Word.id_key(word.id);
        self.kv.put(&key, &encode(word)?)?;
        Ok(())
    }

    pub fn word_by_id(&self, word_id: WordId) -> StorageResult<Option<Word>> {
        self.get_row(&KeyPrefix::Word.id_key(word_id))
    }

    pub fn put_user(&mut self, user: &User) -> StorageResult<()> {
        let key = KeyPrefix::User.id_key(user.id);
        self.kv.put(&key, &encode(user)?)?;
        Ok(())
    }

    pub fn user_by_id(&self, user_id: UserId) -> StorageResult<Option<User>> {
        self.get_row(&KeyPrefix::User.id_key(user_id))
    }

    // -------------------------------------------------------------------------
    // Reviews
    // -------------------------------------------------------------------------

    /// Insert a review in `NEW` status and return it with its id.
    pub fn insert_review(&mut self, new: NewReview) -> StorageResult<Review> {
        let review_id = self.last_id(SEQ_REVIEWS)? + 1;
        let review = Review {
            review_id,
            source_word_id: new.source_word_id,
            target_word_id: new.target_word_id,
            reference: new.reference,
            author_user_id: new.author_user_id,
            status: ReviewStatus::New,
            created_at: new.created_at,
        };

        self.commit(vec![
            BatchOperation::put(KeyPrefix::sequence_key(SEQ_REVIEWS), encode_u64(review_id)),
            BatchOperation::put(KeyPrefix::Review.id_key(review_id), encode(&review)?),
        ])?;

        #[cfg(feature = "tracing-log")]
        tracing::debug!("[lx-01] Inserted review {}", review_id);

        Ok(review)
    }

    pub fn review_by_id(&self, review_id: ReviewId) -> StorageResult<Option<Review>> {
        self.get_row(&KeyPrefix::Review.id_key(review_id))
    }

    /// Update a review's status.
    ///
    /// No-op (returns `false`) if the review is missing or already
    /// `DISCARDED`.
    pub fn set_review_status(
        &mut self,
        review_id: ReviewId,
        status: ReviewStatus,
    ) -> StorageResult<bool> {
        let Some(mut review) = self.review_by_id(review_id)? else {
            return Ok(false);
        };
        if review.status == ReviewStatus::Discarded {
            return Ok(false);
        }
        review.status = status;
        let key = KeyPrefix::Review.id_key(review_id);
        self.kv.put(&key, &encode(&review)?)?;
        Ok(true)
    }

    /// All reviews in ascending id order.
    pub fn reviews(&self) -> StorageResult<Vec<Review>> {
        self.scan_rows(KeyPrefix::Review.as_bytes())
    }

    /// Up to `limit` reviews with id above `after` and the given status,
    /// in ascending id order.
    pub fn reviews_after(
        &self,
        after: ReviewId,
        status: ReviewStatus,
        limit: usize,
    ) -> StorageResult<Vec<Review>> {
        Ok(self
            .reviews()?
            .into_iter()
            .filter(|r| r.review_id > after && r.status == status)
            .take(limit)
            .collect())
    }

    // -------------------------------------------------------------------------
    // Vote ledgers
    // -------------------------------------------------------------------------

    /// Every vote on an item, ordered by voter id.
    pub fn votes(&self, target: VoteTarget, item_id: u64) -> StorageResult<Vec<Vote>> {
        self.scan_rows(&KeyPrefix::item_votes_prefix(target, item_id))
    }

    pub fn vote(
        &self,
        target: VoteTarget,
        item_id: u64,
        voter: UserId,
    ) -> StorageResult<Option<Vote>> {
        self.get_row(&KeyPrefix::vote_key(target, item_id, voter))
    }

    /// Insert a vote. The (item, voter) key is unique: an existing vote of
    /// either value is a conflict.
    pub fn insert_vote(&mut self, target: VoteTarget, vote: &Vote) -> StorageResult<()> {
        let key = KeyPrefix::vote_key(target, vote.item_id, vote.voter_user_id);
        if self.kv.exists(&key)? {
            return Err(StorageError::Conflict {
                what: format!("vote of user {} on item {}", vote.voter_user_id, vote.item_id),
            });
        }
        self.kv.put(&key, &encode(vote)?)?;
        Ok(())
    }

    /// Delete a vote. Returns `false` if there was none.
    pub fn delete_vote(
        &mut self,
        target: VoteTarget,
        item_id: u64,
        voter: UserId,
    ) -> StorageResult<bool> {
        let key = KeyPrefix::vote_key(target, item_id, voter);
        if !self.kv.exists(&key)? {
            return Ok(false);
        }
        self.kv.delete(&key)?;
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Translations
    // -------------------------------------------------------------------------

    pub fn translation_id_for_pair(
        &self,
        source_word_id: WordId,
        target_word_id: WordId,
    ) -> StorageResult<Option<TranslationId>> {
        let key = KeyPrefix::TranslationPair.pair_key(source_word_id, target_word_id);
        match self.kv.get(&key)? {
            Some(bytes) => Ok(Some(decode_u64(&key, &bytes)?)),
            None => Ok(None),
        }
    }

    /// Number of translations for an exact (source, target) pair.
    pub fn translation_count(
        &self,
        source_word_id: WordId,
        target_word_id: WordId,
    ) -> StorageResult<u64> {
        Ok(self
            .translation_id_for_pair(source_word_id, target_word_id)?
            .map_or(0, |_| 1))
    }

    pub fn translation_by_id(
        &self,
        translation_id: TranslationId,
    ) -> StorageResult<Option<Translation>> {
        self.get_row(&KeyPrefix::Translation.id_key(translation_id))
    }

    /// Translations whose source is `source_word_id`.
    pub fn translations_for_source(
        &self,
        source_word_id: WordId,
    ) -> StorageResult<Vec<Translation>> {
        let prefix = KeyPrefix::TranslationPair.id_key(source_word_id);
        let mut result = Vec::new();
        for (key, value) in self.kv.prefix_scan(&prefix)? {
            let translation_id = decode_u64(&key, &value)?;
            let translation = self.translation_by_id(translation_id)?.ok_or_else(|| {
                StorageError::Corruption {
                    key: String::from_utf8_lossy(&key).into_owned(),
                    message: format!("pair index points at missing translation {}", translation_id),
                }
            })?;
            result.push(translation);
        }
        Ok(result)
    }

    /// All translations in ascending id order.
    pub fn translations(&self) -> StorageResult<Vec<Translation>> {
        self.scan_rows(KeyPrefix::Translation.as_bytes())
    }

    /// Up to `limit` translations with id above `after`, ascending.
    pub fn translations_after(
        &self,
        after: TranslationId,
        limit: usize,
    ) -> StorageResult<Vec<Translation>> {
        Ok(self
            .translations()?
            .into_iter()
            .filter(|t| t.translation_id > after)
            .take(limit)
            .collect())
    }

    fn translation_ops(
        &self,
        new: NewTranslation,
    ) -> StorageResult<(Translation, Vec<BatchOperation>)> {
        if self
            .translation_id_for_pair(new.source_word_id, new.target_word_id)?
            .is_some()
        {
            return Err(StorageError::Conflict {
                what: format!(
                    "translation {} -> {}",
                    new.source_word_id, new.target_word_id
                ),
            });
        }

        let translation_id = self.last_id(SEQ_TRANSLATIONS)? + 1;
        let translation = Translation {
            translation_id,
            source_word_id: new.source_word_id,
            target_word_id: new.target_word_id,
            reference: new.reference,
            author_user_id: new.author_user_id,
            created_at: new.created_at,
        };

        let ops = vec![
            BatchOperation::put(
                KeyPrefix::sequence_key(SEQ_TRANSLATIONS),
                encode_u64(translation_id),
            ),
            BatchOperation::put(
                KeyPrefix::Translation.id_key(translation_id),
                encode(&translation)?,
            ),
            BatchOperation::put(
                KeyPrefix::TranslationPair
                    .pair_key(translation.source_word_id, translation.target_word_id),
                encode_u64(translation_id),
            ),
        ];
        Ok((translation, ops))
    }

    /// Insert a translation directly (trusted path, no review).
    pub fn insert_translation(&mut self, new: NewTranslation) -> StorageResult<Translation> {
        let (translation, ops) = self.translation_ops(new)?;
        self.commit(ops)?;
        Ok(translation)
    }

    /// Promote a review in one atomic batch:
    ///
    /// 1. insert the translation row and its pair index
    /// 2. copy `votes` into the translation's ledger, keeping each vote's
    ///    voter, value and original timestamp
    /// 3. mark the review `APPROVED`
    ///
    /// If any step cannot be built nothing is written.
    pub fn commit_promotion(
        &mut self,
        review_id: ReviewId,
        new: NewTranslation,
        votes: &[Vote],
    ) -> StorageResult<Translation> {
        let mut review = self.review_by_id(review_id)?.ok_or_else(|| StorageError::NotFound {
            what: format!("review {}", review_id),
        })?;

        let (translation, mut ops) = self.translation_ops(new)?;

        for vote in votes {
            let migrated = Vote {
                item_id: translation.translation_id,
                ..vote.clone()
            };
            ops.push(BatchOperation::put(
                KeyPrefix::vote_key(
                    VoteTarget::Translation,
                    translation.translation_id,
                    migrated.voter_user_id,
                ),
                encode(&migrated)?,
            ));
        }

        review.status = ReviewStatus::Approved;
        ops.push(BatchOperation::put(
            KeyPrefix::Review.id_key(review_id),
            encode(&review)?,
        ));

        self.commit(ops)?;

        #[cfg(feature = "tracing-log")]
        tracing::debug!(
            "[lx-01] Committed promotion of review {} as translation {} ({} votes)",
            review_id,
            translation.translation_id,
            votes.len()
        );

        Ok(translation)
    }

    // -------------------------------------------------------------------------
    // Contribution ledger
    // -------------------------------------------------------------------------

    /// Append entries with fresh, increasing ids in one batch.
    pub fn append_contribs(
        &mut self,
        entries: Vec<ContribEntry>,
    ) -> StorageResult<Vec<ContribEntry>> {
        if entries.is_empty() {
            return Ok(entries);
        }

        let mut next_id = self.last_id(SEQ_CONTRIBS)?;
        let mut ops = Vec::with_capacity(entries.len() + 1);
        let mut stored = Vec::with_capacity(entries.len());

        for mut entry in entries {
            next_id += 1;
            entry.contrib_id = next_id;
            ops.push(BatchOperation::put(
                KeyPrefix::Contrib.id_key(next_id),
                encode(&entry)?,
            ));
            stored.push(entry);
        }
        ops.push(BatchOperation::put(
            KeyPrefix::sequence_key(SEQ_CONTRIBS),
            encode_u64(next_id),
        ));

        self.commit(ops)?;
        Ok(stored)
    }

    /// Every ledger entry in append order.
    pub fn contribs(&self) -> StorageResult<Vec<ContribEntry>> {
        self.scan_rows(KeyPrefix::Contrib.as_bytes())
    }

    /// Translation id of the most recently appended translation entry, or 0.
    pub fn latest_contrib_translation_id(&self) -> StorageResult<TranslationId> {
        Ok(self
            .contribs()?
            .iter()
            .rev()
            .find(|c| c.translation_id > 0)
            .map_or(0, |c| c.translation_id))
    }

    /// Review id of the most recently appended review entry, or 0.
    pub fn latest_contrib_review_id(&self) -> StorageResult<ReviewId> {
        Ok(self
            .contribs()?
            .iter()
            .rev()
            .find(|c| c.review_id > 0)
            .map_or(0, |c| c.review_id))
    }

    // -------------------------------------------------------------------------
    // Ranking boards
    // -------------------------------------------------------------------------

    /// Replace a board's contents in one batch.
    pub fn replace_ranking(&mut self, board: RankingBoard, rows: &[RankingRow]) -> StorageResult<()> {
        let mut ops: Vec<BatchOperation> = self
            .kv
            .prefix_scan(&KeyPrefix::board_prefix(board))?
            .into_iter()
            .map(|(key, _)| BatchOperation::delete(key))
            .collect();

        for (rank, row) in rows.iter().enumerate() {
            ops.push(BatchOperation::put(
                KeyPrefix::board_key(board, rank as u32),
                encode(row)?,
            ));
        }

        self.commit(ops)
    }

    /// Up to `limit` rows of a board in stored order.
    pub fn ranking(&self, board: RankingBoard, limit: usize) -> StorageResult<Vec<RankingRow>> {
        let mut rows: Vec<RankingRow> = self.scan_rows(&KeyPrefix::board_prefix(board))?;
        rows.truncate(limit);
        Ok(rows)
    }
}
