//! # SHA-256
//!
//! The single digest function used by the software provider. Certifiers
//! identifiers and any hash handed to callers come from here.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    bytes
}
