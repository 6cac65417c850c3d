//! # Certifiers Identifier
//!
//! The digest that binds an organizational-unit claim to the exact,
//! ordered set of certificate authorities that issued the claiming
//! certificate. It is produced by the cryptographic provider's hash over
//! the DER of every non-leaf certificate in the identity's chain.
//!
//! ## Security Invariant
//!
//! Comparisons go through [`subtle::ConstantTimeEq`]. Principals carrying
//! forged or truncated digests must fail, and must not leak how many
//! leading bytes matched. Any length is representable, including zero, so
//! that such principals can be decoded and then rejected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;

/// Opaque digest over the issuing authorities of a certification chain.
#[derive(Clone, Eq, Hash, Default)]
pub struct CertifiersId(Vec<u8>);

impl CertifiersId {
    /// Wrap raw digest bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Return the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of digest bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the digest is zero-length.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from a hex string (either case, surrounding whitespace ignored).
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        hex_to_bytes(&hex.trim().to_lowercase()).map(Self)
    }
}

impl PartialEq for CertifiersId {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl From<Vec<u8>> for CertifiersId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for CertifiersId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "CertifiersId({prefix}..., {} bytes)", self.0.len())
    }
}

impl std::fmt::Display for CertifiersId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for CertifiersId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CertifiersId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .ok_or_else(|| format!("invalid hex at position {i}"))
                .and_then(|pair| {
                    u8::from_str_radix(pair, 16)
                        .map_err(|e| format!("invalid hex at position {i}: {e}"))
                })
        })
        .collect()
}
