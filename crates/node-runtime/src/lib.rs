//! # Lexicon Node Runtime
//!
//! Hosts the review consensus and contribution ledger subsystems.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and subsystem wiring
//! - `adapters/` - Storage backends, data directory lock, identity resolution
//! - `handlers/` - API dispatch and ledger job execution
//! - `scheduler` - Periodic ledger jobs
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Validate the job secret (warning only outside production)
//! 3. Open the storage backend (locking the data directory for RocksDB)
//! 4. Wire subsystems around one critical section
//! 5. Start the scheduler, if enabled

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod handlers;
pub mod scheduler;

use std::sync::Arc;

use lx_01_dictionary_storage::KeyValueStore;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::container::SubsystemContainer;

/// The node runtime: a container plus its background tasks.
pub struct NodeRuntime<KV: KeyValueStore + 'static> {
    container: Arc<SubsystemContainer<KV>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<KV: KeyValueStore + 'static> NodeRuntime<KV> {
    pub fn new(container: SubsystemContainer<KV>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Start background tasks.
    pub async fn start(&self) {
        let config = &self.container.config;
        info!("===========================================");
        info!("  Lexicon Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        info!("Storage: {:?}", config.storage.backend);
        info!("Source language: {}", config.consensus.source_language);

        if config.scheduler.enabled {
            let handle = tokio::spawn(scheduler::run_scheduler(
                Arc::clone(&self.container.jobs),
                config.scheduler.clone(),
                self.shutdown_rx.clone(),
            ));
            self.tasks.lock().push(handle);
        } else {
            info!("Scheduler disabled; ledger jobs run on external triggers only");
        }
    }

    /// Signal shutdown and wait for background tasks.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let tasks: Vec<_> = self.tasks.lock().drain(..).collect();
        for task in tasks {
            if let Err(e) = task.await {
                error!("Background task failed: {}", e);
            }
        }

        info!("Shutdown complete");
    }

    pub fn container(&self) -> Arc<SubsystemContainer<KV>> {
        Arc::clone(&self.container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::NodeConfig;

    #[tokio::test]
    async fn test_start_and_shutdown() {
        let runtime = NodeRuntime::new(SubsystemContainer::in_memory(NodeConfig::default()));
        runtime.start().await;
        assert_eq!(runtime.tasks.lock().len(), 1);

        runtime.shutdown().await;
        assert!(runtime.tasks.lock().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_scheduler_spawns_nothing() {
        let mut config = NodeConfig::default();
        config.scheduler.enabled = false;
        let runtime = NodeRuntime::new(SubsystemContainer::in_memory(config));

        runtime.start().await;
        assert!(runtime.tasks.lock().is_empty());
        runtime.shutdown().await;
    }
}
