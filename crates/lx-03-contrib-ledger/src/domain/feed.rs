//! Recent-activity feed rows.

use serde::{Deserialize, Serialize};
use shared_types::{Timestamp, TranslationId, VoteValue};

/// One vote on a feed translation. Voters without a name show as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedVote {
    pub value: VoteValue,
    pub voter_name: Option<String>,
}

/// A recently created translation with its votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub translation_id: TranslationId,
    pub author_name: String,
    pub source_word: String,
    pub source_lang: String,
    pub target_word: String,
    pub target_lang: String,
    pub votes: Vec<FeedVote>,
    pub created_at: Timestamp,
}
