//! # Key Layout
//!
//! Every table lives under its own prefix. Ids are encoded big-endian so a
//! prefix scan returns rows in ascending id order.
//!
//! | Prefix | Key suffix | Value |
//! |--------|------------|-------|
//! | `w:` | word_id | `Word` |
//! | `u:` | user_id | `User` |
//! | `r:` | review_id | `Review` |
//! | `rv:` | review_id, voter | `Vote` |
//! | `t:` | translation_id | `Translation` |
//! | `tp:` | source_word_id, target_word_id | translation_id |
//! | `tv:` | translation_id, voter | `Vote` |
//! | `c:` | contrib_id | `ContribEntry` |
//! | `k:` | board, rank | `RankingRow` |
//! | `s:` | table name | last assigned id |

use shared_types::{RankingBoard, VoteTarget};

/// Key prefixes, one per logical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    Word,
    User,
    Review,
    ReviewVote,
    Translation,
    TranslationPair,
    TranslationVote,
    Contrib,
    Ranking,
    Sequence,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Word => b"w:",
            KeyPrefix::User => b"u:",
            KeyPrefix::Review => b"r:",
            KeyPrefix::ReviewVote => b"rv:",
            KeyPrefix::Translation => b"t:",
            KeyPrefix::TranslationPair => b"tp:",
            KeyPrefix::TranslationVote => b"tv:",
            KeyPrefix::Contrib => b"c:",
            KeyPrefix::Ranking => b"k:",
            KeyPrefix::Sequence => b"s:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// Key for a row addressed by a single id.
    pub fn id_key(&self, id: u64) -> Vec<u8> {
        self.key(&id.to_be_bytes())
    }

    /// Key addressed by two ids.
    pub fn pair_key(&self, first: u64, second: u64) -> Vec<u8> {
        let mut key = self.id_key(first);
        key.extend_from_slice(&second.to_be_bytes());
        key
    }

    /// Vote ledger prefix for a target kind.
    pub fn votes_of(target: VoteTarget) -> Self {
        match target {
            VoteTarget::Review => KeyPrefix::ReviewVote,
            VoteTarget::Translation => KeyPrefix::TranslationVote,
        }
    }

    /// Key of one (item, voter) vote.
    pub fn vote_key(target: VoteTarget, item_id: u64, voter: u64) -> Vec<u8> {
        Self::votes_of(target).pair_key(item_id, voter)
    }

    /// Prefix covering every vote on an item.
    pub fn item_votes_prefix(target: VoteTarget, item_id: u64) -> Vec<u8> {
        Self::votes_of(target).id_key(item_id)
    }

    /// Prefix covering every row of a board.
    pub fn board_prefix(board: RankingBoard) -> Vec<u8> {
        let tag = match board {
            RankingBoard::AllTime => b'a',
            RankingBoard::Week => b'w',
        };
        KeyPrefix::Ranking.key(&[tag, b':'])
    }

    /// Key of a board row by rank.
    pub fn board_key(board: RankingBoard, rank: u32) -> Vec<u8> {
        let mut key = Self::board_prefix(board);
        key.extend_from_slice(&rank.to_be_bytes());
        key
    }

    /// Key holding the last id assigned in a table.
    pub fn sequence_key(table: &str) -> Vec<u8> {
        KeyPrefix::Sequence.key(table.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_do_not_overlap() {
        let all = [
            KeyPrefix::Word,
            KeyPrefix::User,
            KeyPrefix::Review,
            KeyPrefix::ReviewVote,
            KeyPrefix::Translation,
            KeyPrefix::TranslationPair,
            KeyPrefix::TranslationVote,
            KeyPrefix::Contrib,
            KeyPrefix::Ranking,
            KeyPrefix::Sequence,
        ];
        for a in &all {
            for b in &all {
                if a != b {
                    assert!(
                        !a.as_bytes().starts_with(b.as_bytes()),
                        "{:?} shadows {:?}",
                        b,
                        a
                    );
                }
            }
        }
    }

    #[test]
    fn test_big_endian_ids_sort_numerically() {
        let k9 = KeyPrefix::Review.id_key(9);
        let k10 = KeyPrefix::Review.id_key(10);
        let k256 = KeyPrefix::Review.id_key(256);
        assert!(k9 < k10);
        assert!(k10 < k256);
    }

    #[test]
    fn test_vote_key_falls_under_item_prefix() {
        let key = KeyPrefix::vote_key(VoteTarget::Review, 3, 77);
        assert!(key.starts_with(&KeyPrefix::item_votes_prefix(VoteTarget::Review, 3)));
        assert!(!key.starts_with(&KeyPrefix::item_votes_prefix(VoteTarget::Translation, 3)));
    }

    #[test]
    fn test_boards_are_separate() {
        let week = KeyPrefix::board_key(RankingBoard::Week, 0);
        assert!(week.starts_with(&KeyPrefix::board_prefix(RankingBoard::Week)));
        assert!(!week.starts_with(&KeyPrefix::board_prefix(RankingBoard::AllTime)));
    }
}
