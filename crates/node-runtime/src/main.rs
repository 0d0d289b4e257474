//! # Lexicon Node
//!
//! Entry point: logging, configuration, backend selection, then run until
//! Ctrl+C.

use anyhow::Result;
use lx_01_dictionary_storage::KeyValueStore;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::container::{load_config, NodeConfig, StorageBackend, SubsystemContainer};
use node_runtime::NodeRuntime;

async fn run<KV: KeyValueStore + 'static>(container: SubsystemContainer<KV>) -> Result<()> {
    let runtime = NodeRuntime::new(container);
    runtime.start().await;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}

#[cfg(feature = "rocksdb")]
async fn run_rocksdb(config: NodeConfig) -> Result<()> {
    run(SubsystemContainer::open_rocksdb(config)?).await
}

#[cfg(not(feature = "rocksdb"))]
async fn run_rocksdb(config: NodeConfig) -> Result<()> {
    warn!("LX_STORAGE=rocksdb requires the `rocksdb` feature; using in-memory storage");
    run(SubsystemContainer::in_memory(config)).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config();
    if let Err(e) = config.validate_for_production() {
        warn!("{}", e);
    }

    match config.storage.backend {
        StorageBackend::Memory => run(SubsystemContainer::in_memory(config)).await,
        StorageBackend::RocksDb => run_rocksdb(config).await,
    }
}
