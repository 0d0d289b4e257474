//! # Node Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//!
//! ## Security Requirements
//!
//! - `job_secret` MUST NOT be the default zero value in production
//! - All intervals and limits have sane defaults with environment overrides

use lx_02_review_consensus::ConsensusConfig;
use lx_03_contrib_ledger::LedgerConfig;
use shared_types::UserId;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Security configuration.
    pub security: SecurityConfig,
    /// Job scheduler configuration.
    pub scheduler: SchedulerConfig,
    /// Review consensus configuration.
    pub consensus: ConsensusConfig,
    /// Contribution ledger configuration.
    pub ledger: LedgerConfig,
}

impl NodeConfig {
    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the job secret is the default zero value
    /// - a consensus threshold is zero
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.security.job_secret == [0u8; 32] {
            return Err(ConfigError::InsecureJobSecret);
        }
        if self.consensus.approve_threshold == 0 || self.consensus.disapprove_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }

    /// Build a configuration from defaults plus overrides read through
    /// `lookup`. Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = NodeConfig::default();

        if let Some(dir) = lookup("LX_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup("LX_STORAGE") {
            match backend.as_str() {
                "memory" => config.storage.backend = StorageBackend::Memory,
                "rocksdb" => config.storage.backend = StorageBackend::RocksDb,
                other => warn!("LX_STORAGE must be \"memory\" or \"rocksdb\", got {:?}", other),
            }
        }

        if let Some(secret_hex) = lookup("LX_JOB_SECRET") {
            match hex::decode(&secret_hex) {
                Ok(bytes) if bytes.len() == 32 => {
                    config.security.job_secret.copy_from_slice(&bytes);
                    info!("Loaded job secret from environment");
                }
                _ => warn!("LX_JOB_SECRET must be 32 bytes (64 hex chars)"),
            }
        }
        if let Some(tokens) = lookup("LX_API_TOKENS") {
            config.security.api_tokens = parse_api_tokens(&tokens);
        }

        if let Some(secs) = parse_var(&lookup, "LX_INGEST_INTERVAL_SECS") {
            config.scheduler.ingest_interval_secs = secs;
        }
        if let Some(secs) = parse_var(&lookup, "LX_RANKING_INTERVAL_SECS") {
            config.scheduler.ranking_interval_secs = secs;
        }
        if let Some(enabled) = parse_var(&lookup, "LX_SCHEDULER_ENABLED") {
            config.scheduler.enabled = enabled;
        }

        if let Some(lang) = lookup("LX_SOURCE_LANG") {
            config.consensus.source_language = lang;
        }

        config
    }
}

fn parse_var<V: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<V> {
    let raw = lookup(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparsable {}={:?}", name, raw);
            None
        }
    }
}

/// Parse `token:user_id` pairs separated by commas.
fn parse_api_tokens(raw: &str) -> HashMap<String, UserId> {
    raw.split(',')
        .filter(|pair| !pair.trim().is_empty())
        .filter_map(|pair| {
            let (token, user) = pair.trim().split_once(':')?;
            match user.parse() {
                Ok(user_id) if !token.is_empty() => Some((token.to_string(), user_id)),
                _ => {
                    warn!("Ignoring malformed API token entry");
                    None
                }
            }
        })
        .collect()
}

/// Load configuration from the process environment.
pub fn load_config() -> NodeConfig {
    NodeConfig::from_lookup(|name| std::env::var(name).ok())
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Job secret is not set (zero value).
    InsecureJobSecret,
    /// A quorum threshold of zero would resolve reviews without votes.
    ZeroThreshold,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InsecureJobSecret => {
                write!(
                    f,
                    "SECURITY VIOLATION: job secret is default zero value. \
                     Set LX_JOB_SECRET environment variable."
                )
            }
            ConfigError::ZeroThreshold => write!(f, "Consensus thresholds must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    Memory,
    /// Requires the `rocksdb` feature.
    RocksDb,
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Data directory for the RocksDB backend and its lock file.
    pub data_dir: PathBuf,
    /// Which backend to open.
    pub backend: StorageBackend,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            backend: StorageBackend::Memory,
        }
    }
}

/// Security configuration.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HMAC secret for scheduler job triggers (32 bytes).
    /// MUST NOT be default in production.
    pub job_secret: [u8; 32],
    /// Bearer tokens accepted by the static identity resolver.
    pub api_tokens: HashMap<String, UserId>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            job_secret: [0u8; 32], // MUST be overridden in production
            api_tokens: HashMap::new(),
        }
    }
}

/// Periodic job configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Run ledger jobs on the node's own timer.
    pub enabled: bool,
    /// Seconds between ingestion runs (both scans).
    pub ingest_interval_secs: u64,
    /// Seconds between ranking recomputations.
    pub ranking_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ingest_interval_secs: 300,
            ranking_interval_secs: 3600,
        }
    }
}
