//! Contribution Ledger Service
//!
//! Ingestion scans and ranking recomputation hold the process-wide lock for
//! their full duration. Both are idempotent: ingestion resumes from the
//! high-water mark stored in the ledger itself, and rankings are rebuilt
//! from scratch on every run.

use crate::domain::{
    count_since, disapprove_entries, rank, ranking, translation_entries, FeedItem, FeedVote,
};
use crate::error::LedgerResult;
use crate::ports::inbound::{LedgerApi, RankingSizes, Rankings};
use crate::ports::outbound::LedgerStore;
use async_trait::async_trait;
use lx_01_dictionary_storage::TimeSource;
use shared_types::{
    ContribEntry, ExclusiveStore, RankingBoard, RankingRow, ReviewStatus, Timestamp, VoteTarget,
};
use std::cmp::Reverse;
use std::sync::Arc;

/// Ledger configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Translations (or reviews) consumed per ingestion run
    pub ingest_batch_size: usize,
    /// Lower bound (exclusive) of the all-time board
    pub ranking_epoch: Timestamp,
    /// Width of the trailing weekly window
    pub ranking_window_secs: u64,
    /// Rows kept per board
    pub ranking_top_n: usize,
    /// Rows returned per board on read
    pub ranking_fetch_limit: usize,
    /// Width of the recent-activity window
    pub feed_window_secs: u64,
    /// Items returned by the feed
    pub feed_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            ingest_batch_size: 10,
            ranking_epoch: 1_701_613_211,
            ranking_window_secs: 7 * 24 * 3600,
            ranking_top_n: 20,
            ranking_fetch_limit: 100,
            feed_window_secs: 2 * 24 * 3600,
            feed_limit: 100,
        }
    }
}

/// Contribution ledger service implementation
pub struct ContribLedgerService<S, T>
where
    S: LedgerStore,
    T: TimeSource,
{
    config: LedgerConfig,
    store: ExclusiveStore<S>,
    clock: Arc<T>,
}

impl<S, T> ContribLedgerService<S, T>
where
    S: LedgerStore,
    T: TimeSource,
{
    pub fn new(config: LedgerConfig, store: ExclusiveStore<S>, clock: Arc<T>) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn store(&self) -> &ExclusiveStore<S> {
        &self.store
    }

    /// Rebuild one board from `entries` newer than `since`.
    fn rebuild(
        &self,
        store: &mut S,
        board: RankingBoard,
        entries: &[ContribEntry],
        since: Timestamp,
    ) -> LedgerResult<usize> {
        let mut rows: Vec<RankingRow> = Vec::new();
        for (user_id, counts) in count_since(entries, since)? {
            match store.display_name(user_id)? {
                Some(name) => rows.push(ranking::row(user_id, name, counts)),
                None => tracing::warn!(
                    "[lx-03] User {} has ledger entries but no display name, skipped",
                    user_id
                ),
            }
        }

        let rows = rank(rows, self.config.ranking_top_n);
        store.replace_ranking(board, &rows)?;

        tracing::info!(
            "[lx-03] Repopulated {} board, start time {}, size {}",
            board.as_str(),
            since,
            rows.len()
        );
        Ok(rows.len())
    }
}

#[async_trait]
impl<S, T> LedgerApi for ContribLedgerService<S, T>
where
    S: LedgerStore,
    T: TimeSource,
{
    async fn collect_contribs(&self) -> LedgerResult<usize> {
        let mut store = self.store.lock();
        let mark = store.latest_contrib_translation_id()?;
        tracing::debug!("[lx-03] Translation scan from id {}", mark);

        let mut scanned = Vec::new();
        for translation in store.translations_after(mark, self.config.ingest_batch_size)? {
            let votes = store.votes(VoteTarget::Translation, translation.translation_id)?;
            scanned.push((translation, votes));
        }

        let appended = store.append_contribs(translation_entries(&scanned))?;
        tracing::info!(
            "[lx-03] Translation scan appended {} entries ({} translations after {})",
            appended,
            scanned.len(),
            mark
        );
        Ok(appended)
    }

    async fn collect_disapprove_contribs(&self) -> LedgerResult<usize> {
        let mut store = self.store.lock();
        let mark = store.latest_contrib_review_id()?;
        tracing::debug!("[lx-03] Disapprove scan from review {}", mark);

        let mut scanned = Vec::new();
        for review in
            store.reviews_after(mark, ReviewStatus::Disapproved, self.config.ingest_batch_size)?
        {
            let votes = store.votes(VoteTarget::Review, review.review_id)?;
            scanned.push((review, votes));
        }

        let appended = store.append_contribs(disapprove_entries(&scanned))?;
        tracing::info!(
            "[lx-03] Disapprove scan appended {} entries ({} reviews after {})",
            appended,
            scanned.len(),
            mark
        );
        Ok(appended)
    }

    async fn calculate_rankings(&self) -> LedgerResult<RankingSizes> {
        let mut store = self.store.lock();
        let now = self.clock.now();
        let entries = store.contribs()?;

        let alltime = self.rebuild(
            &mut store,
            RankingBoard::AllTime,
            &entries,
            self.config.ranking_epoch,
        )?;
        let week = self.rebuild(
            &mut store,
            RankingBoard::Week,
            &entries,
            now.saturating_sub(self.config.ranking_window_secs),
        )?;
        Ok(RankingSizes { alltime, week })
    }

    async fn get_rankings(&self) -> LedgerResult<Rankings> {
        let store = self.store.lock();
        let limit = self.config.ranking_fetch_limit;
        Ok(Rankings {
            alltime: store.ranking(RankingBoard::AllTime, limit)?,
            week: store.ranking(RankingBoard::Week, limit)?,
        })
    }

    async fn get_feed(&self) -> LedgerResult<Vec<FeedItem>> {
        let store = self.store.lock();
        let since = self.clock.now().saturating_sub(self.config.feed_window_secs);

        let mut recent: Vec<_> = store
            .translations()?
            .into_iter()
            .filter(|t| t.created_at >= since)
            .collect();
        recent.sort_by_key(|t| Reverse((t.created_at, t.translation_id)));

        let mut feed = Vec::new();
        for translation in recent {
            if feed.len() == self.config.feed_limit {
                break;
            }
            let (Some(author_name), Some(source), Some(target)) = (
                store.display_name(translation.author_user_id)?,
                store.word_by_id(translation.source_word_id)?,
                store.word_by_id(translation.target_word_id)?,
            ) else {
                tracing::warn!(
                    "[lx-03] Translation {} has a missing author or word, left out of feed",
                    translation.translation_id
                );
                continue;
            };

            let mut votes = Vec::new();
            for vote in store.votes(VoteTarget::Translation, translation.translation_id)? {
                votes.push(FeedVote {
                    value: vote.value,
                    voter_name: store.display_name(vote.voter_user_id)?,
                });
            }

            feed.push(FeedItem {
                translation_id: translation.translation_id,
                author_name,
                source_word: source.text,
                source_lang: source.lang,
                target_word: target.text,
                target_lang: target.lang,
                votes,
                created_at: translation.created_at,
            });
        }
        Ok(feed)
    }
}
