//! # Ledger Job Runner
//!
//! Runs the three ledger jobs, either on the node's own timer or when an
//! external scheduler presents a signed trigger.
//!
//! ## Trigger Format
//!
//! ```text
//! job       = "collect_contribs" | "collect_disapprove_contribs" | "calculate_rankings"
//! signature = hex(HMAC-SHA256(job_secret, "<job>:<timestamp>"))
//! ```

use lx_03_contrib_ledger::{LedgerApi, LedgerError, RankingSizes};
use serde::{Deserialize, Serialize};
use shared_types::{verify_trigger, ParseEnumError, Timestamp, TriggerError};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// A ledger job the scheduler can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    CollectContribs,
    CollectDisapproveContribs,
    CalculateRankings,
}

impl JobKind {
    pub const ALL: [JobKind; 3] = [
        JobKind::CollectContribs,
        JobKind::CollectDisapproveContribs,
        JobKind::CalculateRankings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::CollectContribs => "collect_contribs",
            JobKind::CollectDisapproveContribs => "collect_disapprove_contribs",
            JobKind::CalculateRankings => "calculate_rankings",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("JobKind", s))
    }
}

/// What a job run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOutcome {
    /// Ledger entries appended by an ingestion scan.
    Appended(usize),
    /// Board sizes after recomputation.
    Ranked(RankingSizes),
}

/// Report for one job run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    pub run_id: Uuid,
    pub job: JobKind,
    pub outcome: JobOutcome,
}

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Unknown job: {0}")]
    UnknownJob(#[from] ParseEnumError),

    #[error("Trigger rejected: {0}")]
    Unauthorized(#[from] TriggerError),

    #[error("Job failed: {0}")]
    Ledger(#[from] LedgerError),
}

/// Executes ledger jobs against a [`LedgerApi`].
pub struct JobRunner<L: LedgerApi> {
    ledger: Arc<L>,
    job_secret: [u8; 32],
}

impl<L: LedgerApi> JobRunner<L> {
    pub fn new(ledger: Arc<L>, job_secret: [u8; 32]) -> Self {
        Self { ledger, job_secret }
    }

    /// Run a job unconditionally. Used by the internal scheduler.
    pub async fn run(&self, job: JobKind) -> Result<JobReport, JobError> {
        let run_id = Uuid::new_v4();
        let outcome = match job {
            JobKind::CollectContribs => self.ledger.collect_contribs().await.map(JobOutcome::Appended),
            JobKind::CollectDisapproveContribs => self
                .ledger
                .collect_disapprove_contribs()
                .await
                .map(JobOutcome::Appended),
            JobKind::CalculateRankings => {
                self.ledger.calculate_rankings().await.map(JobOutcome::Ranked)
            }
        };

        match outcome {
            Ok(outcome) => {
                info!("[node] job {} run={} finished: {:?}", job, run_id, outcome);
                Ok(JobReport {
                    run_id,
                    job,
                    outcome,
                })
            }
            Err(e) => {
                error!("[node] job {} run={} failed: {}", job, run_id, e);
                Err(e.into())
            }
        }
    }

    /// Verify an external trigger and run the named job.
    pub async fn trigger(
        &self,
        job: &str,
        timestamp: Timestamp,
        signature_hex: &str,
        now: Timestamp,
    ) -> Result<JobReport, JobError> {
        if let Err(e) = verify_trigger(job, timestamp, signature_hex, &self.job_secret, now) {
            warn!("[node] rejected trigger for {:?}: {}", job, e);
            return Err(e.into());
        }
        let kind: JobKind = job.parse()?;
        self.run(kind).await
    }
}
