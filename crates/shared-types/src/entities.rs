//! # Core Domain Entities
//!
//! Rows of the dictionary as seen by the consensus and ledger subsystems.
//!
//! ## Clusters
//!
//! - **Dictionary**: `Word`, `User`, `Translation`
//! - **Consensus**: `Review`, `ReviewStatus`, `Vote`, `VoteValue`, `VoteTarget`
//! - **Ledger**: `ContribEntry`, `ContribAction`, `RankingRow`, `RankingBoard`

use crate::errors::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Authenticated user identifier. `0` is never assigned.
pub type UserId = u64;

/// Word identifier in the word store.
pub type WordId = u64;

/// Review identifier, assigned on creation.
pub type ReviewId = u64;

/// Translation identifier, assigned on promotion.
pub type TranslationId = u64;

/// Monotonic ledger row identifier, used as the ingestion cursor.
pub type ContribId = u64;

// =============================================================================
// CLUSTER A: DICTIONARY
// =============================================================================

/// A dictionary word. Only `id` and `lang` matter to consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub text: String,
    /// Two-letter language code (`"kk"`, `"en"`, `"ru"`).
    pub lang: String,
    pub pos: Option<String>,
    pub comment: Option<String>,
}

impl Word {
    pub fn new(id: WordId, text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            lang: lang.into(),
            pos: None,
            comment: None,
        }
    }
}

/// A registered user, as far as rankings and listings need one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
}

/// A promoted, permanent dictionary link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub translation_id: TranslationId,
    pub source_word_id: WordId,
    pub target_word_id: WordId,
    pub reference: String,
    /// Copied from the originating review.
    pub author_user_id: UserId,
    pub created_at: Timestamp,
}

// =============================================================================
// CLUSTER B: CONSENSUS
// =============================================================================

/// Review lifecycle status.
///
/// ```text
/// NEW ──approve quorum──→ APPROVED      (terminal)
///  │
///  ├──disapprove quorum──→ DISAPPROVED  (terminal)
///  │
///  └──author discard────→ DISCARDED     (terminal)
/// ```
///
/// `PENDING` is a recognised stored value that is never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    #[default]
    New,
    Pending,
    Approved,
    Disapproved,
    Discarded,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::New => "NEW",
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::Approved => "APPROVED",
            ReviewStatus::Disapproved => "DISAPPROVED",
            ReviewStatus::Discarded => "DISCARDED",
        }
    }

    /// Terminal statuses never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReviewStatus::Approved | ReviewStatus::Disapproved | ReviewStatus::Discarded
        )
    }

    /// Only `NEW` reviews accept votes.
    pub fn is_open(&self) -> bool {
        *self == ReviewStatus::New
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(ReviewStatus::New),
            "PENDING" => Ok(ReviewStatus::Pending),
            "APPROVED" => Ok(ReviewStatus::Approved),
            "DISAPPROVED" => Ok(ReviewStatus::Disapproved),
            "DISCARDED" => Ok(ReviewStatus::Discarded),
            other => Err(ParseEnumError::new("ReviewStatus", other)),
        }
    }
}

/// A candidate translation awaiting consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: ReviewId,
    pub source_word_id: WordId,
    pub target_word_id: WordId,
    /// Free-text citation supplied by the author.
    pub reference: String,
    pub author_user_id: UserId,
    pub status: ReviewStatus,
    pub created_at: Timestamp,
}

/// One voter's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteValue {
    Approve,
    Disapprove,
}

impl VoteValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteValue::Approve => "APPROVE",
            VoteValue::Disapprove => "DISAPPROVE",
        }
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteValue {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVE" => Ok(VoteValue::Approve),
            "DISAPPROVE" => Ok(VoteValue::Disapprove),
            other => Err(ParseEnumError::new("VoteValue", other)),
        }
    }
}

/// Which vote ledger an item id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteTarget {
    Review,
    Translation,
}

/// A single vote. At most one exists per (target, item, voter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Review id or translation id, depending on the ledger.
    pub item_id: u64,
    pub voter_user_id: UserId,
    pub value: VoteValue,
    pub created_at: Timestamp,
}

// =============================================================================
// CLUSTER C: LEDGER
// =============================================================================

/// A consequential action credited to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContribAction {
    AddTranslation,
    ApproveConfirmed,
    DisapproveConfirmed,
}

impl ContribAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContribAction::AddTranslation => "ADD_TRANSLATION",
            ContribAction::ApproveConfirmed => "APPROVE_CONFIRMED",
            ContribAction::DisapproveConfirmed => "DISAPPROVE_CONFIRMED",
        }
    }
}

impl fmt::Display for ContribAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContribAction {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD_TRANSLATION" => Ok(ContribAction::AddTranslation),
            "APPROVE_CONFIRMED" => Ok(ContribAction::ApproveConfirmed),
            "DISAPPROVE_CONFIRMED" => Ok(ContribAction::DisapproveConfirmed),
            other => Err(ParseEnumError::new("ContribAction", other)),
        }
    }
}

/// Immutable ledger row.
///
/// Exactly one of `translation_id` / `review_id` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContribEntry {
    /// Assigned on append; `0` until stored.
    pub contrib_id: ContribId,
    pub translation_id: TranslationId,
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub action: ContribAction,
    pub created_at: Timestamp,
}

impl ContribEntry {
    /// Entry credited against a translation.
    pub fn for_translation(
        translation_id: TranslationId,
        user_id: UserId,
        action: ContribAction,
        created_at: Timestamp,
    ) -> Self {
        Self {
            contrib_id: 0,
            translation_id,
            review_id: 0,
            user_id,
            action,
            created_at,
        }
    }

    /// Entry credited against a review.
    pub fn for_review(
        review_id: ReviewId,
        user_id: UserId,
        action: ContribAction,
        created_at: Timestamp,
    ) -> Self {
        Self {
            contrib_id: 0,
            translation_id: 0,
            review_id,
            user_id,
            action,
            created_at,
        }
    }

    /// Checks the exactly-one-reference rule.
    pub fn is_well_formed(&self) -> bool {
        (self.translation_id == 0) != (self.review_id == 0)
    }
}

/// The two materialized leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingBoard {
    AllTime,
    Week,
}

impl RankingBoard {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingBoard::AllTime => "alltime",
            RankingBoard::Week => "week",
        }
    }
}

/// A derived leaderboard row. Fully replaced on every aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRow {
    pub user_id: UserId,
    pub display_name: String,
    pub contribs: u64,
    pub translations: u64,
    pub approves: u64,
    pub disapproves: u64,
}
