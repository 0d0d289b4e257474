//! Driving Ports (API - Inbound)

use crate::domain::{ReviewQuery, ReviewSummary, Tally};
use crate::error::ConsensusResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Review, ReviewId, ReviewStatus, TranslationId, UserId, VoteValue, WordId};

/// Candidate translation submitted for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReview {
    pub source_word_id: WordId,
    pub target_word_id: WordId,
    pub reference: String,
}

/// Result of casting or retracting a review vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    /// Tally after the vote, from the voter's point of view.
    pub tally: Tally,
    /// Review status after any transition.
    pub status: ReviewStatus,
    /// True if the review left the open queue.
    pub gone: bool,
    /// Set when this vote promoted the review.
    pub translation_id: Option<TranslationId>,
}

/// Primary consensus API.
///
/// Every call runs inside the process-wide critical section for its full
/// duration.
#[async_trait]
pub trait ReviewConsensusApi: Send + Sync {
    /// Create a `NEW` review after language and duplicate checks.
    async fn submit_review(&self, author: UserId, request: SubmitReview)
        -> ConsensusResult<Review>;

    /// Author-only discard. Fails with `NoReview` for approved, discarded or
    /// foreign reviews.
    async fn discard_review(&self, author: UserId, review_id: ReviewId) -> ConsensusResult<()>;

    /// Record a vote, re-tally and apply the transition rule.
    async fn cast_vote(
        &self,
        review_id: ReviewId,
        voter: UserId,
        value: VoteValue,
    ) -> ConsensusResult<VoteOutcome>;

    /// Remove a held vote, re-tally and apply the transition rule.
    async fn retract_vote(
        &self,
        review_id: ReviewId,
        voter: UserId,
        value: VoteValue,
    ) -> ConsensusResult<VoteOutcome>;

    /// Promote an open review regardless of its tally.
    async fn promote_review(&self, review_id: ReviewId) -> ConsensusResult<TranslationId>;

    /// Current tally of a review as seen by `viewer`.
    async fn review_tally(
        &self,
        review_id: ReviewId,
        viewer: Option<UserId>,
    ) -> ConsensusResult<Tally>;

    /// Open reviews, newest first.
    async fn list_reviews(&self, query: ReviewQuery) -> ConsensusResult<Vec<ReviewSummary>>;
}
