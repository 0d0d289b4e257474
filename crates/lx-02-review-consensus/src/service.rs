//! Review Consensus Service - core business logic
//!
//! Vote mutation, re-tally, transition and promotion run under one
//! acquisition of the process-wide lock, so a caller never observes a tally
//! without its status effect.

use crate::domain::{
    evaluate, ReviewFilter, ReviewQuery, ReviewSummary, Tally, Thresholds, Transition,
};
use crate::error::{ConsensusError, ConsensusResult};
use crate::ports::inbound::{ReviewConsensusApi, SubmitReview, VoteOutcome};
use crate::ports::outbound::ConsensusStore;
use async_trait::async_trait;
use lx_01_dictionary_storage::{NewReview, NewTranslation, TimeSource};
use shared_types::{
    ExclusiveStore, Review, ReviewId, ReviewStatus, Translation, TranslationId, UserId, Vote,
    VoteTarget, VoteValue, Word, WordId,
};
use std::cmp::Reverse;
use std::sync::Arc;

/// Consensus configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsensusConfig {
    /// Approve votes needed (with a strict majority) to promote
    pub approve_threshold: u64,
    /// Disapprove votes needed (with a strict majority) to reject
    pub disapprove_threshold: u64,
    /// Canonical source language of every translation
    pub source_language: String,
    /// Listing page size when the caller gives none
    pub default_page_size: usize,
    /// Largest accepted listing page
    pub max_page_size: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        let quorum = Thresholds::default();
        Self {
            approve_threshold: quorum.approve,
            disapprove_threshold: quorum.disapprove,
            source_language: "kk".to_string(),
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl ConsensusConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            approve: self.approve_threshold,
            disapprove: self.disapprove_threshold,
        }
    }
}

/// Review consensus service implementation
pub struct ReviewConsensusService<S, T>
where
    S: ConsensusStore,
    T: TimeSource,
{
    config: ConsensusConfig,
    store: ExclusiveStore<S>,
    clock: Arc<T>,
}

impl<S, T> ReviewConsensusService<S, T>
where
    S: ConsensusStore,
    T: TimeSource,
{
    pub fn new(config: ConsensusConfig, store: ExclusiveStore<S>, clock: Arc<T>) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    /// Handle to the shared store (same lock as every other subsystem).
    pub fn store(&self) -> &ExclusiveStore<S> {
        &self.store
    }

    fn word(store: &S, word_id: WordId) -> ConsensusResult<Word> {
        store
            .word_by_id(word_id)?
            .ok_or(ConsensusError::WordNotFound { word_id })
    }

    /// Language and uniqueness checks shared by submission and promotion.
    fn check_pair(
        &self,
        store: &S,
        source_word_id: WordId,
        target_word_id: WordId,
    ) -> ConsensusResult<()> {
        let source = Self::word(store, source_word_id)?;
        if source.lang != self.config.source_language {
            return Err(ConsensusError::InvalidSource {
                word_id: source_word_id,
                lang: source.lang,
                expected: self.config.source_language.clone(),
            });
        }

        let target = Self::word(store, target_word_id)?;
        if target.lang == self.config.source_language {
            return Err(ConsensusError::InvalidTarget {
                word_id: target_word_id,
                lang: target.lang,
            });
        }

        if store.existing_translation_count(source_word_id, target_word_id)? > 0 {
            return Err(ConsensusError::DuplicateTranslation {
                source_word_id,
                target_word_id,
            });
        }
        Ok(())
    }

    /// The review, if it exists and is still `NEW`.
    fn open_review(store: &S, review_id: ReviewId) -> ConsensusResult<Review> {
        match store.review_by_id(review_id)? {
            Some(review) if review.status.is_open() => Ok(review),
            Some(review) => {
                tracing::warn!(
                    "[lx-02] Review {} is {}, not open",
                    review_id,
                    review.status
                );
                Err(ConsensusError::NoReview { review_id })
            }
            None => {
                tracing::warn!("[lx-02] Review {} not found", review_id);
                Err(ConsensusError::NoReview { review_id })
            }
        }
    }

    /// Promotion with the lock already held. Preconditions are re-read from
    /// storage, never trusted from the caller.
    fn promote_locked(&self, store: &mut S, review_id: ReviewId) -> ConsensusResult<Translation> {
        let review = Self::open_review(store, review_id)?;
        self.check_pair(store, review.source_word_id, review.target_word_id)?;

        let votes = store.votes(VoteTarget::Review, review_id)?;
        let translation = store.commit_promotion(
            review_id,
            NewTranslation {
                source_word_id: review.source_word_id,
                target_word_id: review.target_word_id,
                reference: review.reference.clone(),
                author_user_id: review.author_user_id,
                created_at: self.clock.now(),
            },
            &votes,
        )?;

        tracing::info!(
            "[lx-02] Review {} promoted to translation {} ({} votes migrated)",
            review_id,
            translation.translation_id,
            votes.len()
        );
        Ok(translation)
    }

    /// Re-tally after a committed vote change and apply the transition.
    fn settle(
        &self,
        store: &mut S,
        review: &Review,
        voter: UserId,
    ) -> ConsensusResult<VoteOutcome> {
        let votes = store.votes(VoteTarget::Review, review.review_id)?;
        let tally = Tally::from_votes(&votes, Some(voter));

        let outcome = match evaluate(&tally, review.status, &self.config.thresholds()) {
            Transition::Approve => {
                let translation = self.promote_locked(store, review.review_id)?;
                VoteOutcome {
                    tally,
                    status: ReviewStatus::Approved,
                    gone: true,
                    translation_id: Some(translation.translation_id),
                }
            }
            Transition::Disapprove => {
                store.set_review_status(review.review_id, ReviewStatus::Disapproved)?;
                tracing::info!(
                    "[lx-02] Review {} disapproved ({} against {})",
                    review.review_id,
                    tally.disapproves,
                    tally.approves
                );
                VoteOutcome {
                    tally,
                    status: ReviewStatus::Disapproved,
                    gone: true,
                    translation_id: None,
                }
            }
            Transition::Stay => VoteOutcome {
                tally,
                status: review.status,
                gone: false,
                translation_id: None,
            },
        };
        Ok(outcome)
    }

    fn summarize(
        store: &S,
        review: Review,
        viewer: Option<UserId>,
        filter: &ReviewFilter,
    ) -> ConsensusResult<Option<ReviewSummary>> {
        let (Some(source_word), Some(target_word)) = (
            store.word_by_id(review.source_word_id)?,
            store.word_by_id(review.target_word_id)?,
        ) else {
            tracing::warn!(
                "[lx-02] Review {} references a missing word, skipped",
                review.review_id
            );
            return Ok(None);
        };

        if let ReviewFilter::Direction { src_lang, dst_lang } = filter {
            if &source_word.lang != src_lang || &target_word.lang != dst_lang {
                return Ok(None);
            }
        }

        let votes = store.votes(VoteTarget::Review, review.review_id)?;
        let tally = Tally::from_votes(&votes, viewer);
        if let ReviewFilter::MinApproves(min) = filter {
            if tally.approves < *min {
                return Ok(None);
            }
        }

        let mut known_translations = Vec::new();
        for translation in store.translations_for_source(review.source_word_id)? {
            if let Some(word) = store.word_by_id(translation.target_word_id)? {
                if word.lang == target_word.lang {
                    known_translations.push(word);
                }
            }
        }

        let author_name = store.display_name(review.author_user_id)?;
        Ok(Some(ReviewSummary {
            review,
            tally,
            author_name,
            source_word,
            target_word,
            known_translations,
        }))
    }
}

#[async_trait]
impl<S, T> ReviewConsensusApi for ReviewConsensusService<S, T>
where
    S: ConsensusStore,
    T: TimeSource,
{
    async fn submit_review(
        &self,
        author: UserId,
        request: SubmitReview,
    ) -> ConsensusResult<Review> {
        let mut store = self.store.lock();
        self.check_pair(&store, request.source_word_id, request.target_word_id)?;

        let review = store.insert_review(NewReview {
            source_word_id: request.source_word_id,
            target_word_id: request.target_word_id,
            reference: request.reference,
            author_user_id: author,
            created_at: self.clock.now(),
        })?;

        tracing::info!(
            "[lx-02] User {} submitted review {} ({} -> {})",
            author,
            review.review_id,
            review.source_word_id,
            review.target_word_id
        );
        Ok(review)
    }

    async fn discard_review(&self, author: UserId, review_id: ReviewId) -> ConsensusResult<()> {
        let mut store = self.store.lock();
        let review = store
            .review_by_id(review_id)?
            .ok_or(ConsensusError::NoReview { review_id })?;

        if review.author_user_id != author
            || matches!(
                review.status,
                ReviewStatus::Approved | ReviewStatus::Discarded
            )
        {
            tracing::warn!(
                "[lx-02] User {} cannot discard review {} (author {}, status {})",
                author,
                review_id,
                review.author_user_id,
                review.status
            );
            return Err(ConsensusError::NoReview { review_id });
        }

        store.set_review_status(review_id, ReviewStatus::Discarded)?;
        tracing::info!("[lx-02] Review {} discarded by its author", review_id);
        Ok(())
    }

    async fn cast_vote(
        &self,
        review_id: ReviewId,
        voter: UserId,
        value: VoteValue,
    ) -> ConsensusResult<VoteOutcome> {
        let mut store = self.store.lock();
        let review = Self::open_review(&store, review_id)?;

        let vote = Vote {
            item_id: review_id,
            voter_user_id: voter,
            value,
            created_at: self.clock.now(),
        };
        if let Err(e) = store.cast_vote(VoteTarget::Review, vote) {
            tracing::warn!("[lx-02] Vote rejected: {}", e);
            return Err(e);
        }

        self.settle(&mut store, &review, voter)
    }

    async fn retract_vote(
        &self,
        review_id: ReviewId,
        voter: UserId,
        value: VoteValue,
    ) -> ConsensusResult<VoteOutcome> {
        let mut store = self.store.lock();
        let review = Self::open_review(&store, review_id)?;

        if let Err(e) = store.retract_vote(VoteTarget::Review, review_id, voter, value) {
            tracing::warn!("[lx-02] Retraction rejected: {}", e);
            return Err(e);
        }

        self.settle(&mut store, &review, voter)
    }

    async fn promote_review(&self, review_id: ReviewId) -> ConsensusResult<TranslationId> {
        let mut store = self.store.lock();
        let translation = self.promote_locked(&mut store, review_id)?;
        Ok(translation.translation_id)
    }

    async fn review_tally(
        &self,
        review_id: ReviewId,
        viewer: Option<UserId>,
    ) -> ConsensusResult<Tally> {
        let store = self.store.lock();
        if store.review_by_id(review_id)?.is_none() {
            return Err(ConsensusError::NoReview { review_id });
        }
        let votes = store.votes(VoteTarget::Review, review_id)?;
        Ok(Tally::from_votes(&votes, viewer))
    }

    async fn list_reviews(&self, query: ReviewQuery) -> ConsensusResult<Vec<ReviewSummary>> {
        let count = query.validate(self.config.default_page_size, self.config.max_page_size)?;
        let store = self.store.lock();

        let mut open: Vec<Review> = store
            .reviews()?
            .into_iter()
            .filter(|r| r.status.is_open())
            .collect();
        open.sort_by_key(|r| Reverse((r.created_at, r.review_id)));

        let mut page = Vec::with_capacity(count);
        let mut skipped = 0;
        for review in open {
            let Some(summary) = Self::summarize(&store, review, query.viewer, &query.filter)?
            else {
                continue;
            };
            if skipped < query.offset {
                skipped += 1;
                continue;
            }
            page.push(summary);
            if page.len() == count {
                break;
            }
        }
        Ok(page)
    }
}
