//! Ports for review consensus.

pub mod inbound;
pub mod outbound;

pub use inbound::{ReviewConsensusApi, SubmitReview, VoteOutcome};
pub use outbound::{
    ConsensusStore, ReviewStore, TranslationStore, UserDirectory, VoteLedger, WordStore,
};
