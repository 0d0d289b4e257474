//! # Subsystem Container
//!
//! Holds the subsystem instances and wires them to one storage handle.
//!
//! ## Wiring
//!
//! ```text
//!                 ExclusiveStore<DictionaryStore<KV>>
//!                    │ (one lock, cloned handles)
//!          ┌─────────┴──────────┐
//!          ▼                    ▼
//!  ReviewConsensusService   ContribLedgerService ◄── JobRunner ◄── scheduler
//!          ▲                    ▲                       ▲
//!          └──────── ApiHandler ┴───────────────────────┘
//! ```
//!
//! Consensus writes and ledger jobs contend on the same lock, so no tally
//! is ever observed half-applied by an ingestion scan.

use std::sync::Arc;

use lx_01_dictionary_storage::{
    DictionaryStore, InMemoryKVStore, KeyValueStore, SystemTimeSource,
};
use lx_02_review_consensus::ReviewConsensusService;
use lx_03_contrib_ledger::ContribLedgerService;
use shared_types::ExclusiveStore;
use tracing::info;

use crate::adapters::identity::StaticTokenResolver;
use crate::adapters::storage::DatabaseLock;
use crate::container::config::NodeConfig;
use crate::handlers::api::ApiHandler;
use crate::handlers::jobs::JobRunner;

/// Consensus service over a dictionary store.
pub type ConsensusService<KV> = ReviewConsensusService<DictionaryStore<KV>, SystemTimeSource>;

/// Ledger service over a dictionary store.
pub type LedgerService<KV> = ContribLedgerService<DictionaryStore<KV>, SystemTimeSource>;

/// API handler for a container.
pub type NodeApi<KV> = ApiHandler<ConsensusService<KV>, LedgerService<KV>, StaticTokenResolver>;

/// Central container holding all subsystem instances.
pub struct SubsystemContainer<KV: KeyValueStore + 'static> {
    pub config: NodeConfig,
    /// The single critical section every subsystem goes through.
    pub store: ExclusiveStore<DictionaryStore<KV>>,
    pub consensus: Arc<ConsensusService<KV>>,
    pub ledger: Arc<LedgerService<KV>>,
    pub jobs: Arc<JobRunner<LedgerService<KV>>>,
    pub identity: Arc<StaticTokenResolver>,
    pub api: NodeApi<KV>,
    /// Held for the container's lifetime when the backend is on disk.
    _lock: Option<DatabaseLock>,
}

impl<KV: KeyValueStore + 'static> SubsystemContainer<KV> {
    /// Wire all subsystems around `kv`.
    pub fn new(config: NodeConfig, kv: KV) -> Self {
        Self::with_lock(config, kv, None)
    }

    fn with_lock(config: NodeConfig, kv: KV, lock: Option<DatabaseLock>) -> Self {
        info!("Initializing subsystems");

        let store = ExclusiveStore::new(DictionaryStore::new(kv));
        let clock = Arc::new(SystemTimeSource);

        let consensus = Arc::new(ReviewConsensusService::new(
            config.consensus.clone(),
            store.clone(),
            Arc::clone(&clock),
        ));
        info!(
            "  [lx-02] Review Consensus initialized (approve>={}, disapprove>={})",
            config.consensus.approve_threshold, config.consensus.disapprove_threshold
        );

        let ledger = Arc::new(ContribLedgerService::new(
            config.ledger.clone(),
            store.clone(),
            Arc::clone(&clock),
        ));
        info!("  [lx-03] Contribution Ledger initialized");

        let jobs = Arc::new(JobRunner::new(
            Arc::clone(&ledger),
            config.security.job_secret,
        ));
        let identity = Arc::new(StaticTokenResolver::new(
            config.security.api_tokens.clone(),
        ));
        info!("  Identity resolver loaded with {} tokens", identity.len());

        let api = ApiHandler::new(
            Arc::clone(&consensus),
            Arc::clone(&ledger),
            Arc::clone(&jobs),
            Arc::clone(&identity),
            clock,
        );

        Self {
            config,
            store,
            consensus,
            ledger,
            jobs,
            identity,
            api,
            _lock: lock,
        }
    }

    /// True if consensus and ledger share the container's lock.
    pub fn shares_one_lock(&self) -> bool {
        self.store.same_lock(self.consensus.store()) && self.store.same_lock(self.ledger.store())
    }
}

impl SubsystemContainer<InMemoryKVStore> {
    /// Container over a fresh in-memory store.
    pub fn in_memory(config: NodeConfig) -> Self {
        Self::new(config, InMemoryKVStore::new())
    }
}

#[cfg(feature = "rocksdb")]
impl SubsystemContainer<crate::adapters::storage::RocksDbStore> {
    /// Lock the data directory and open RocksDB inside it.
    pub fn open_rocksdb(config: NodeConfig) -> anyhow::Result<Self> {
        use crate::adapters::storage::{RocksDbConfig, RocksDbStore};
        use anyhow::Context;

        let lock = DatabaseLock::acquire(&config.storage.data_dir)
            .context("Failed to lock data directory")?;
        let kv = RocksDbStore::open(RocksDbConfig::in_dir(&config.storage.data_dir))
            .context("Failed to open RocksDB")?;
        info!("RocksDB opened under {:?}", config.storage.data_dir);

        Ok(Self::with_lock(config, kv, Some(lock)))
    }
}
