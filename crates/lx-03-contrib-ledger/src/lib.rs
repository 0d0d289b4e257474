//! # lx-03-contrib-ledger
//!
//! Append-only record of every consequential action per user, and the two
//! leaderboards derived from it.
//!
//! ## Jobs
//!
//! | Job | Reads | Appends / replaces |
//! |-----|-------|--------------------|
//! | translation scan | translations + their votes after the mark | ADD_TRANSLATION, APPROVE_CONFIRMED |
//! | disapprove scan | DISAPPROVED reviews + their votes after the mark | DISAPPROVE_CONFIRMED |
//! | rankings | whole ledger | all-time and weekly boards |
//!
//! Each scan consumes a bounded batch and finds its starting point in the
//! ledger itself, so a run can be repeated or interrupted without
//! duplicating entries. Jobs are triggered by the node's scheduler or by a
//! signed external trigger.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lx_03_contrib_ledger::{ContribLedgerService, LedgerApi, LedgerConfig};
//!
//! let ledger = ContribLedgerService::new(LedgerConfig::default(), store, clock);
//! let added = ledger.collect_contribs().await?;
//! let sizes = ledger.calculate_rankings().await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{FeedItem, FeedVote};
pub use error::{LedgerError, LedgerResult};
pub use ports::inbound::{LedgerApi, RankingSizes, Rankings};
pub use ports::outbound::LedgerStore;
pub use service::{ContribLedgerService, LedgerConfig};
