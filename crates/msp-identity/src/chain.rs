//! # Certification Chains
//!
//! Builds the ordered path from a subject certificate up to a configured
//! trust anchor.
//!
//! ## Resolution
//!
//! ```text
//! current = leaf
//! loop:
//!     current ∈ anchors           → done
//!     len(chain) == max depth     → MaxDepthExceeded
//!     issuer = first candidate in (anchors ++ intermediates) with
//!              subject_raw == current.issuer_raw
//!              key family   == current.signature_algorithm
//!              verify(issuer.key, current.tbs, current.signature)
//!     none                        → NoPathToTrustAnchor
//!     issuer already in chain     → CycleDetected
//!     push issuer
//! ```
//!
//! ## Security Invariant
//!
//! A [`CertificationChain`] always starts at the subject and ends at a
//! trust anchor. Partial chains are never returned.

use msp_core::ChainError;
use msp_crypto::{Certificate, CryptoProvider};

/// Default maximum number of certificates in a chain, leaf included.
pub const MAX_CHAIN_DEPTH: usize = 16;

/// A leaf-first path ending at a trust anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationChain {
    certificates: Vec<Certificate>,
}

impl CertificationChain {
    /// The subject certificate.
    pub fn leaf(&self) -> &Certificate {
        // Construction guarantees at least one element.
        &self.certificates[0]
    }

    /// The trust anchor the chain ends at.
    pub fn anchor(&self) -> &Certificate {
        &self.certificates[self.certificates.len() - 1]
    }

    /// Every certificate above the leaf, in chain order.
    pub fn issuers(&self) -> &[Certificate] {
        &self.certificates[1..]
    }

    /// Number of certificates, leaf included.
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// Iterate leaf first.
    pub fn iter(&self) -> std::slice::Iter<'_, Certificate> {
        self.certificates.iter()
    }

    /// The certificates as a slice, leaf first.
    pub fn as_slice(&self) -> &[Certificate] {
        &self.certificates
    }
}

impl<'a> IntoIterator for &'a CertificationChain {
    type Item = &'a Certificate;
    type IntoIter = std::slice::Iter<'a, Certificate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Resolves certification chains using a crypto provider.
#[derive(Debug, Clone, Copy)]
pub struct ChainBuilder<'p> {
    provider: &'p dyn CryptoProvider,
    max_depth: usize,
}

impl<'p> ChainBuilder<'p> {
    /// Create a builder with the default depth bound.
    pub fn new(provider: &'p dyn CryptoProvider) -> Self {
        Self {
            provider,
            max_depth: MAX_CHAIN_DEPTH,
        }
    }

    /// Override the depth bound. Values below 1 are raised to 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// The configured depth bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build the chain from `leaf` to one of `anchors`.
    pub fn build(
        &self,
        leaf: &Certificate,
        anchors: &[Certificate],
        intermediates: &[Certificate],
    ) -> Result<CertificationChain, ChainError> {
        let mut certificates = vec![leaf.clone()];

        loop {
            let current = &certificates[certificates.len() - 1];
            if anchors.contains(current) {
                return Ok(CertificationChain { certificates });
            }
            if certificates.len() >= self.max_depth {
                return Err(ChainError::MaxDepthExceeded {
                    max_depth: self.max_depth,
                });
            }

            let issuer = anchors
                .iter()
                .chain(intermediates)
                .find(|candidate| self.issued(candidate, current))
                .ok_or_else(|| ChainError::NoPathToTrustAnchor {
                    subject: current.subject().to_string(),
                })?;

            if certificates.contains(issuer) {
                return Err(ChainError::CycleDetected {
                    subject: issuer.subject().to_string(),
                });
            }
            certificates.push(issuer.clone());
        }
    }

    /// Whether `issuer` issued and signed `subject`.
    fn issued(&self, issuer: &Certificate, subject: &Certificate) -> bool {
        if issuer.subject_raw() != subject.issuer_raw() {
            return false;
        }
        match subject.signature_algorithm().key_algorithm() {
            Some(family) if &family == issuer.public_key().algorithm() => {}
            _ => return false,
        }
        self.provider
            .verify(issuer.public_key(), subject.tbs(), subject.signature())
    }
}
