//! # Subsystem Container
//!
//! Configuration plus the container that owns every subsystem instance.

pub mod config;
pub mod subsystems;

pub use config::{
    load_config, ConfigError, NodeConfig, SchedulerConfig, SecurityConfig, StorageBackend,
    StorageConfig,
};
pub use subsystems::{ConsensusService, LedgerService, NodeApi, SubsystemContainer};
