//! # Handlers
//!
//! Request dispatch for the API surface and execution of ledger jobs.

pub mod api;
pub mod jobs;

pub use api::{ApiHandler, ApiReply};
pub use jobs::{JobError, JobKind, JobOutcome, JobReport, JobRunner};
