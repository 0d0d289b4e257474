//! Domain logic for review consensus
//!
//! - tally: vote counts derived from the ledger
//! - transition: the pure quorum rule shared by cast and retract
//! - listing: paged review queries

pub mod listing;
pub mod tally;
pub mod transition;

pub use listing::{ReviewFilter, ReviewQuery, ReviewSummary};
pub use tally::Tally;
pub use transition::{evaluate, Thresholds, Transition};
