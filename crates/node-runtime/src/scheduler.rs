//! # Periodic Job Scheduler
//!
//! Runs ledger ingestion and ranking recomputation on the node's own timer.
//! Both ingestion scans share one interval; rankings run on a slower one.
//! A failing run is logged and retried on the next tick.

use crate::container::config::SchedulerConfig;
use crate::handlers::jobs::{JobKind, JobRunner};
use lx_03_contrib_ledger::LedgerApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Drive `jobs` until `shutdown` flips to true.
pub async fn run_scheduler<L: LedgerApi + 'static>(
    jobs: Arc<JobRunner<L>>,
    config: SchedulerConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ingest = interval(Duration::from_secs(config.ingest_interval_secs.max(1)));
    let mut ranking = interval(Duration::from_secs(config.ranking_interval_secs.max(1)));
    ingest.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ranking.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "[node] scheduler started: ingest every {}s, rankings every {}s",
        config.ingest_interval_secs, config.ranking_interval_secs
    );

    loop {
        tokio::select! {
            _ = ingest.tick() => {
                // Errors are already logged by the runner.
                let _ = jobs.run(JobKind::CollectContribs).await;
                let _ = jobs.run(JobKind::CollectDisapproveContribs).await;
            }
            _ = ranking.tick() => {
                let _ = jobs.run(JobKind::CalculateRankings).await;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("[node] scheduler shutdown signal received");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lx_03_contrib_ledger::{FeedItem, LedgerResult, RankingSizes, Rankings};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLedger {
        ingests: AtomicUsize,
        rankings: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl LedgerApi for CountingLedger {
        async fn collect_contribs(&self) -> LedgerResult<usize> {
            self.ingests.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }

        async fn collect_disapprove_contribs(&self) -> LedgerResult<usize> {
            Ok(0)
        }

        async fn calculate_rankings(&self) -> LedgerResult<RankingSizes> {
            self.rankings.fetch_add(1, Ordering::SeqCst);
            Ok(RankingSizes {
                alltime: 0,
                week: 0,
            })
        }

        async fn get_rankings(&self) -> LedgerResult<Rankings> {
            Ok(Rankings::default())
        }

        async fn get_feed(&self) -> LedgerResult<Vec<FeedItem>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_ticks_and_stops() {
        let ledger = Arc::new(CountingLedger::default());
        let jobs = Arc::new(JobRunner::new(Arc::clone(&ledger), [0u8; 32]));
        let (tx, rx) = watch::channel(false);
        let config = SchedulerConfig {
            enabled: true,
            ingest_interval_secs: 10,
            ranking_interval_secs: 30,
        };

        let handle = tokio::spawn(run_scheduler(jobs, config, rx));

        // First ticks fire immediately, then at 10s, 20s, 30s.
        tokio::time::sleep(Duration::from_secs(35)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(ledger.ingests.load(Ordering::SeqCst), 4);
        assert_eq!(ledger.rankings.load(Ordering::SeqCst), 2);
    }
}
