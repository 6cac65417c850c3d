//! # msp-cli — Membership Service Provider Command-Line Interface
//!
//! Operator tooling around the trust core. The on-disk MSP directory
//! loader lives here, outside the core, which only ever sees an in-memory
//! `MspConfig`.
//!
//! ## Subcommands
//!
//! - `serialize` — Print the identity envelope of a certificate or the default signer
//! - `inspect` — Summarize a loaded MSP
//! - `validate` — Deserialize and validate an identity envelope
//! - `check-principal` — Evaluate a principal against an identity
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `msp-identity`; no trust logic here.
//! - Handlers return a process exit code: 0 success, 1 rejection.

pub mod inspect;
pub mod loader;
pub mod principal;
pub mod serialize;
pub mod validate;

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Read an identity envelope from `path`. The file may hold raw envelope
/// bytes or their hex encoding.
pub fn read_envelope(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read identity: {}", path.display()))?;
    match std::str::from_utf8(&bytes) {
        Ok(text) if is_hex(text.trim()) => hex_to_bytes(text.trim()),
        _ => Ok(bytes),
    }
}

fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode a hex string into bytes.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    if !hex.is_ascii() {
        bail!("hex string contains non-ASCII characters");
    }
    if hex.len() % 2 != 0 {
        bail!("hex string has odd length: {}", hex.len());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .with_context(|| format!("invalid hex at position {i}"))
        })
        .collect()
}

/// Encode bytes as lowercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let bytes = hex_to_bytes("deadbeef").unwrap();
        assert_eq!(bytes, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(bytes_to_hex(&bytes), "deadbeef");
    }

    #[test]
    fn hex_odd_length_rejected() {
        assert!(hex_to_bytes("abc").is_err());
        assert!(hex_to_bytes("zz").is_err());
    }

    #[test]
    fn envelope_file_may_be_hex_or_raw() {
        let dir = tempfile::tempdir().unwrap();
        let hex_path = dir.path().join("id.hex");
        std::fs::write(&hex_path, "00000001410000000130\n").unwrap();
        assert_eq!(
            read_envelope(&hex_path).unwrap(),
            vec![0, 0, 0, 1, b'A', 0, 0, 0, 1, 0x30]
        );

        let raw_path = dir.path().join("id.bin");
        std::fs::write(&raw_path, [0u8, 0, 0, 1, b'A', 0, 0, 0, 1, 0x30]).unwrap();
        assert_eq!(read_envelope(&raw_path).unwrap().len(), 10);

        assert!(read_envelope(&dir.path().join("missing")).is_err());
    }
}
