//! Identifier minting and content fingerprints for generated logos.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use sha2::{Digest, Sha256};

use logo_core::Combination;

/// Process-wide sequence; never reset, so ids are never reissued.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Mint a fresh identifier of the form `{prefix}-{unix_millis}-{sequence}`.
pub fn mint_id(prefix: &str) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{seq}", Utc::now().timestamp_millis())
}

/// Hex SHA-256 over the asset ids and layout of a combination. Two logos
/// share a fingerprint exactly when they are the same design.
pub fn fingerprint(combination: &Combination) -> String {
    let mut hasher = Sha256::new();
    for part in [
        combination.icon.id.as_str(),
        combination.font.id.as_str(),
        combination.palette.id.as_str(),
        combination.layout.id(),
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}
