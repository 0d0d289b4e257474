//! # Test Fixtures
//!
//! One in-memory dictionary shared by the consensus and ledger services,
//! exactly as the node container wires them, plus a settable clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lx_01_dictionary_storage::{DictionaryStore, InMemoryKVStore, TimeSource};
use lx_02_review_consensus::{
    ConsensusConfig, ReviewConsensusApi, ReviewConsensusService, SubmitReview,
};
use lx_03_contrib_ledger::{ContribLedgerService, LedgerConfig};
use shared_types::{ExclusiveStore, ReviewId, User, UserId, Word, WordId};

/// 2027-01-15, well past the all-time ranking epoch.
pub const NOW: u64 = 1_800_000_000;

// Words
pub const KITAP: WordId = 1; // "кітап", kk
pub const BOOK: WordId = 2; // "book", en
pub const ZHAZU: WordId = 3; // "жазу", kk
pub const WRITE: WordId = 4; // "write", en
pub const KNIGA: WordId = 5; // "книга", ru

// Users
pub const AUTHOR: UserId = 10;
pub const ALICE: UserId = 11;
pub const BOB: UserId = 12;
pub const CAROL: UserId = 13;
pub const DAVE: UserId = 14;
/// Has votes but no user row.
pub const GHOST: UserId = 99;

pub struct TestClock(AtomicU64);

impl TestClock {
    pub fn at(now: u64) -> Self {
        Self(AtomicU64::new(now))
    }

    pub fn set(&self, now: u64) {
        self.0.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for TestClock {
    fn now(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

pub type Store = DictionaryStore<InMemoryKVStore>;
pub type Consensus = ReviewConsensusService<Store, TestClock>;
pub type Ledger = ContribLedgerService<Store, TestClock>;

pub struct TestNode {
    pub store: ExclusiveStore<Store>,
    pub clock: Arc<TestClock>,
    pub consensus: Arc<Consensus>,
    pub ledger: Arc<Ledger>,
}

impl TestNode {
    pub fn new() -> Self {
        Self::with_config(ConsensusConfig::default(), LedgerConfig::default())
    }

    pub fn with_config(consensus: ConsensusConfig, ledger: LedgerConfig) -> Self {
        let mut dict = DictionaryStore::in_memory();
        seed(&mut dict);

        let store = ExclusiveStore::new(dict);
        let clock = Arc::new(TestClock::at(NOW));
        Self {
            consensus: Arc::new(ReviewConsensusService::new(
                consensus,
                store.clone(),
                Arc::clone(&clock),
            )),
            ledger: Arc::new(ContribLedgerService::new(
                ledger,
                store.clone(),
                Arc::clone(&clock),
            )),
            store,
            clock,
        }
    }

    /// Submit a review as `author` and return its id.
    pub async fn submit(&self, author: UserId, source: WordId, target: WordId) -> ReviewId {
        self.consensus
            .submit_review(
                author,
                SubmitReview {
                    source_word_id: source,
                    target_word_id: target,
                    reference: format!("ref {source}->{target}"),
                },
            )
            .await
            .expect("submission should succeed")
            .review_id
    }
}

fn seed(dict: &mut Store) {
    for word in [
        Word::new(KITAP, "кітап", "kk"),
        Word::new(BOOK, "book", "en"),
        Word::new(ZHAZU, "жазу", "kk"),
        Word::new(WRITE, "write", "en"),
        Word::new(KNIGA, "книга", "ru"),
    ] {
        dict.put_word(&word).expect("seed word");
    }
    for (id, name) in [
        (AUTHOR, "author"),
        (ALICE, "alice"),
        (BOB, "bob"),
        (CAROL, "carol"),
        (DAVE, "dave"),
    ] {
        dict.put_user(&User {
            id,
            display_name: name.to_string(),
        })
        .expect("seed user");
    }
}
