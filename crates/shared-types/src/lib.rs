//! # Shared Types Crate
//!
//! Entities and closed enumerations shared by every Lexicon subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: review, vote, translation and ledger rows are
//!   defined once here and reused by storage, consensus and the ledger.
//! - **Closed Enumerations**: statuses, vote values and ledger actions are
//!   tagged enums; textual forms are validated on parse and unknown values are
//!   rejected.
//! - **One Critical Section**: all consensus-affecting state is reached
//!   through an [`ExclusiveStore`], which serializes writers process-wide.

pub mod entities;
pub mod errors;
pub mod security;
pub mod sync;

pub use entities::*;
pub use errors::*;
pub use security::*;
pub use sync::ExclusiveStore;
