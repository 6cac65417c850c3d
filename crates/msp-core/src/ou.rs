//! # Organizational Units
//!
//! An organizational unit (OU) is a sub-group claim carried in an
//! identity's certificate. On its own the claim means little: anyone who
//! can get a certificate issued can put any OU string in it. The claim
//! becomes meaningful once it is paired with the [`CertifiersId`] of the
//! authorities that issued the certificate.
//!
//! - [`OrganizationalUnit`] is the derived, per-identity view: unit name,
//!   owning organization and the certifiers digest of the identity's chain.
//! - [`OuIdentifier`] is the configured form: an MSP that restricts
//!   membership lists the `(unit, certifiers)` pairs it accepts.

use serde::{Deserialize, Serialize};

use crate::certifiers::CertifiersId;
use crate::organization::OrganizationId;

/// An organizational unit claimed by an identity, bound to its issuers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationalUnit {
    /// The OU name as it appears in the certificate subject.
    pub unit_identifier: String,
    /// The organization of the identity that carries the claim.
    pub organization_id: OrganizationId,
    /// Digest over the issuing authorities of the identity's chain.
    pub certifiers_identifier: CertifiersId,
}

/// A `(unit, certifiers)` pair accepted by an MSP's OU restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OuIdentifier {
    /// The OU name that must be claimed.
    pub unit_identifier: String,
    /// The exact certifiers digest the claim must be bound to.
    pub certifiers_identifier: CertifiersId,
}

impl OuIdentifier {
    /// Create a configured OU identifier.
    pub fn new(unit_identifier: impl Into<String>, certifiers_identifier: CertifiersId) -> Self {
        Self {
            unit_identifier: unit_identifier.into(),
            certifiers_identifier,
        }
    }

    /// Whether `unit` carries exactly this unit name and certifiers digest.
    pub fn matches(&self, unit: &OrganizationalUnit) -> bool {
        // Evaluate both comparisons so the digest check is always performed.
        let digest_eq = self.certifiers_identifier == unit.certifiers_identifier;
        let name_eq = self.unit_identifier == unit.unit_identifier;
        digest_eq & name_eq
    }
}
