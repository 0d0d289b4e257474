//! # lx-02-review-consensus
//!
//! Vote-driven review lifecycle: contributors submit candidate translations
//! as reviews, other users vote, and a quorum either promotes the review into
//! a permanent translation or rejects it.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Vote Ledger**: one vote per (item, voter); switching requires a retraction
//! - **Consensus Engine**: a pure transition rule evaluated after every cast and retract
//! - **Promotion Transaction**: translation insert, vote migration and status
//!   update committed as one batch
//! - **Review listing**: paged open reviews with the viewer's tally
//!
//! ## Architecture
//!
//! ```text
//! API layer ──cast/retract/submit/discard──→ Consensus (2)
//!                                               │
//!                                               ├── ExclusiveStore (process-wide lock)
//!                                               │
//!                                               └── Dictionary Storage (1)
//! ```
//!
//! ## Quorum
//!
//! | Tally | Result |
//! |-------|--------|
//! | approves > disapproves, approves >= 2 | APPROVED + translation |
//! | disapproves > approves, disapproves >= 2 | DISAPPROVED (terminal) |
//! | otherwise (including every tie) | stays NEW |
//!
//! ## Example
//!
//! ```rust,ignore
//! use lx_02_review_consensus::{ConsensusConfig, ReviewConsensusApi, ReviewConsensusService};
//!
//! let service = ReviewConsensusService::new(ConsensusConfig::default(), store, clock);
//! let outcome = service.cast_vote(review_id, voter, VoteValue::Approve).await?;
//! if outcome.gone {
//!     // review left the queue
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{
    evaluate, ReviewFilter, ReviewQuery, ReviewSummary, Tally, Thresholds, Transition,
};
pub use error::{ConsensusError, ConsensusResult};
pub use ports::inbound::{ReviewConsensusApi, SubmitReview, VoteOutcome};
pub use ports::outbound::ConsensusStore;
pub use service::{ConsensusConfig, ReviewConsensusService};
