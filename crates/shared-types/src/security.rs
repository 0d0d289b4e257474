//! # Scheduler Trigger Security
//!
//! Ledger ingestion and ranking recomputation are triggered by an external
//! scheduler. A trigger is accepted only if it carries an HMAC-SHA256
//! signature over `"<job>:<timestamp>"` made with the shared job secret, and
//! its timestamp falls inside the validity window.
//!
//! ## Security Properties
//!
//! - **HMAC-SHA256 Signatures**: constant-time verification via `hmac`
//! - **Time-Bounded Validity**: triggers expire after [`MAX_AGE`] seconds

use crate::errors::TriggerError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Maximum allowed clock skew for future timestamps (seconds).
pub const MAX_FUTURE_SKEW: u64 = 10;

/// Maximum age for valid timestamps (seconds).
pub const MAX_AGE: u64 = 60;

// =============================================================================
// SIGNING
// =============================================================================

/// Canonical bytes covered by a trigger signature.
pub fn trigger_message(job: &str, timestamp: u64) -> Vec<u8> {
    format!("{}:{}", job, timestamp).into_bytes()
}

/// Signs a job trigger, returning the hex-encoded HMAC.
pub fn sign_trigger(job: &str, timestamp: u64, shared_secret: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(shared_secret).expect("HMAC can take key of any size");
    mac.update(&trigger_message(job, timestamp));
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a job trigger against `now`.
///
/// Checks run cheapest first: timestamp window, signature shape, then the
/// constant-time HMAC comparison.
pub fn verify_trigger(
    job: &str,
    timestamp: u64,
    signature_hex: &str,
    shared_secret: &[u8],
    now: u64,
) -> Result<(), TriggerError> {
    validate_timestamp_at(timestamp, now)?;

    let signature = hex::decode(signature_hex).map_err(|_| TriggerError::MalformedSignature)?;
    if signature.len() != 32 {
        return Err(TriggerError::MalformedSignature);
    }

    let mut mac = HmacSha256::new_from_slice(shared_secret)
        .map_err(|_| TriggerError::InvalidSignature)?;
    mac.update(&trigger_message(job, timestamp));
    mac.verify_slice(&signature)
        .map_err(|_| TriggerError::InvalidSignature)
}

// =============================================================================
// TIMESTAMP VALIDATION
// =============================================================================

/// Validates that a trigger timestamp is within the acceptable window.
///
/// ```text
/// |-------- MAX_AGE --------|-- MAX_FUTURE_SKEW --|
/// ^                         ^                     ^
/// now - 60s                now               now + 10s
/// ```
pub fn validate_timestamp_at(timestamp: u64, now: u64) -> Result<(), TriggerError> {
    if timestamp.saturating_add(MAX_AGE) < now || timestamp > now.saturating_add(MAX_FUTURE_SKEW)
    {
        return Err(TriggerError::TimestampOutOfRange { timestamp, now });
    }
    Ok(())
}

/// Returns the current Unix timestamp.
///
/// If the system clock is before UNIX_EPOCH this returns 0 instead of
/// panicking.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
