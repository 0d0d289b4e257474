//! Ports for the contribution ledger.

pub mod inbound;
pub mod outbound;

pub use inbound::{LedgerApi, RankingSizes, Rankings};
pub use outbound::LedgerStore;
