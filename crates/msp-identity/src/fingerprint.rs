//! # Certifiers Identifier
//!
//! Binds an organizational-unit claim to the exact authorities that
//! certified it.
//!
//! ```text
//! certifiers_identifier = H( DER(chain[1]) || DER(chain[2]) || ... || DER(chain[n-1]) )
//! ```
//!
//! The leaf is excluded, so every identity issued by the same authorities
//! shares one identifier. A chain of length one hashes the empty string.
//! Replacing or reordering any issuer changes the digest.

use msp_core::CertifiersId;
use msp_crypto::CryptoProvider;

use crate::chain::CertificationChain;

/// Compute the certifiers identifier of `chain` with `provider`'s hash.
pub fn certifiers_identifier(
    provider: &dyn CryptoProvider,
    chain: &CertificationChain,
) -> CertifiersId {
    let mut material = Vec::new();
    for issuer in chain.issuers() {
        material.extend_from_slice(issuer.raw());
    }
    CertifiersId::new(provider.hash(&material))
}
