//! Driving Ports (API - Inbound)

use crate::domain::FeedItem;
use crate::error::LedgerResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::RankingRow;

/// Board sizes after a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSizes {
    pub alltime: usize,
    pub week: usize,
}

/// Both boards as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rankings {
    pub alltime: Vec<RankingRow>,
    pub week: Vec<RankingRow>,
}

/// Ledger jobs and reads. Jobs are idempotent and safe to re-run.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Translation/approve scan. Returns the number of entries appended.
    async fn collect_contribs(&self) -> LedgerResult<usize>;

    /// Review-disapprove scan. Returns the number of entries appended.
    async fn collect_disapprove_contribs(&self) -> LedgerResult<usize>;

    /// Fully replace the all-time and weekly boards.
    async fn calculate_rankings(&self) -> LedgerResult<RankingSizes>;

    async fn get_rankings(&self) -> LedgerResult<Rankings>;

    /// Recently created translations, newest first.
    async fn get_feed(&self) -> LedgerResult<Vec<FeedItem>>;
}
