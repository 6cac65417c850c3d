//! # Crypto Provider Abstraction
//!
//! Every hash, signature, verification and certificate parse performed by
//! the MSP goes through a [`CryptoProvider`]. The MSP is configured with one
//! provider at setup and never reaches for a concrete algorithm itself, so
//! an HSM-backed or FIPS-restricted backend can replace the software one
//! without touching trust logic.
//!
//! ## Design Principles
//!
//! 1. **Object safe.** The MSP stores `Arc<dyn CryptoProvider>`.
//!
//! 2. **Verification is a predicate.** `verify` answers yes or no. A key of
//!    an unsupported algorithm or a malformed signature is simply a no.
//!
//! 3. **DER out.** `parse_certificate` accepts PEM or DER and always yields
//!    a [`Certificate`] whose `raw()` is DER.

use msp_core::CryptoError;

use crate::certificate::{Certificate, PublicKey};
use crate::keys::PrivateKey;

/// Type of provider backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    /// In-process software implementation (sha2, p256, ed25519-dalek).
    Software,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Software => write!(f, "software"),
        }
    }
}

/// Cryptographic backend used by an MSP.
///
/// Implementations MUST:
/// - Never expose private key bytes.
/// - Be safe to call from many threads at once.
/// - Return the same digest for the same input for the provider's lifetime.
pub trait CryptoProvider: Send + Sync + std::fmt::Debug {
    /// Digest `data` with the provider's hash function.
    fn hash(&self, data: &[u8]) -> Vec<u8>;

    /// Sign `message` with `key`.
    fn sign(&self, key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Whether `signature` is a valid signature over `message` by `key`.
    fn verify(&self, key: &PublicKey, message: &[u8], signature: &[u8]) -> bool;

    /// Parse a PEM or DER encoded X.509 certificate.
    fn parse_certificate(&self, material: &[u8]) -> Result<Certificate, CryptoError>;

    /// Import a PEM or DER encoded PKCS#8 private key.
    fn import_private_key(&self, material: &[u8]) -> Result<PrivateKey, CryptoError>;

    /// The provider backend type.
    fn provider_type(&self) -> ProviderType;
}
