//! # Review State Machine
//!
//! ```text
//! NEW ──approves > disapproves && approves >= T_a──→ APPROVED    (promotion)
//!  │
//!  ├──disapproves > approves && disapproves >= T_d──→ DISAPPROVED
//!  │
//!  └──author discard──→ DISCARDED
//! ```
//!
//! Both cast and retract call [`evaluate`]; only `NEW` reviews move. Ties
//! never resolve.

use super::tally::Tally;
use shared_types::ReviewStatus;

/// Quorum thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub approve: u64,
    pub disapprove: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            approve: 2,
            disapprove: 2,
        }
    }
}

/// Outcome of evaluating a review's tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Promote to a translation and mark `APPROVED`.
    Approve,
    /// Mark `DISAPPROVED`.
    Disapprove,
    /// Leave the status as is.
    Stay,
}

/// Decide the transition for a review with `tally` in `status`.
pub fn evaluate(tally: &Tally, status: ReviewStatus, thresholds: &Thresholds) -> Transition {
    if status != ReviewStatus::New {
        return Transition::Stay;
    }
    if tally.approves > tally.disapproves && tally.approves >= thresholds.approve {
        Transition::Approve
    } else if tally.disapproves > tally.approves && tally.disapproves >= thresholds.disapprove {
        Transition::Disapprove
    } else {
        Transition::Stay
    }
}
