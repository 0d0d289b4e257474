//! Domain logic for the contribution ledger
//!
//! - ingest: scanned rows to ledger entries
//! - ranking: leaderboard aggregation
//! - feed: recent-activity rows

pub mod feed;
pub mod ingest;
pub mod ranking;

pub use feed::{FeedItem, FeedVote};
pub use ingest::{disapprove_entries, translation_entries};
pub use ranking::{count_since, rank, UserCounts};
