//! # Ranking Aggregation
//!
//! Pure recomputation of a leaderboard from ledger entries. Same input,
//! same board: counts are grouped in a `BTreeMap` and the final order breaks
//! every tie on `user_id`.

use crate::error::{LedgerError, LedgerResult};
use shared_types::{ContribAction, ContribEntry, RankingRow, Timestamp, UserId};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Per-user counts before names are attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounts {
    pub contribs: u64,
    pub translations: u64,
    pub approves: u64,
    pub disapproves: u64,
}

impl UserCounts {
    fn record(&mut self, action: ContribAction) {
        self.contribs += 1;
        match action {
            ContribAction::AddTranslation => self.translations += 1,
            ContribAction::ApproveConfirmed => self.approves += 1,
            ContribAction::DisapproveConfirmed => self.disapproves += 1,
        }
    }
}

/// Count entries with `created_at > since`, grouped by user.
pub fn count_since(
    entries: &[ContribEntry],
    since: Timestamp,
) -> LedgerResult<BTreeMap<UserId, UserCounts>> {
    let mut counts: BTreeMap<UserId, UserCounts> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.created_at > since) {
        if !entry.is_well_formed() {
            return Err(LedgerError::MalformedEntry {
                contrib_id: entry.contrib_id,
            });
        }
        counts.entry(entry.user_id).or_default().record(entry.action);
    }
    Ok(counts)
}

/// Build a named row.
pub fn row(user_id: UserId, display_name: String, counts: UserCounts) -> RankingRow {
    RankingRow {
        user_id,
        display_name,
        contribs: counts.contribs,
        translations: counts.translations,
        approves: counts.approves,
        disapproves: counts.disapproves,
    }
}

/// Order by (contribs, translations, disapproves) descending, then
/// `user_id` ascending, and keep the first `top_n`.
pub fn rank(mut rows: Vec<RankingRow>, top_n: usize) -> Vec<RankingRow> {
    rows.sort_by_key(|r| {
        (
            Reverse(r.contribs),
            Reverse(r.translations),
            Reverse(r.disapproves),
            r.user_id,
        )
    });
    rows.truncate(top_n);
    rows
}
