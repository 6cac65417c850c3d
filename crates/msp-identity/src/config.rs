//! # MSP Configuration
//!
//! The raw materials an MSP is built from. A configuration is read once by
//! [`Msp::setup`](crate::Msp::setup) and never consulted again; to change
//! trust anchors, admins or OU restrictions, build a new configuration and
//! set up a new MSP.
//!
//! Certificates and keys are carried as PEM or DER byte blobs. Parsing is
//! the job of the MSP's crypto provider, so a configuration can be
//! assembled without one.

use msp_core::{OrganizationId, OuIdentifier};
use zeroize::Zeroizing;

/// Certificate and private key of an MSP's default signer.
#[derive(Clone)]
pub struct SigningIdentityInfo {
    /// PEM or DER signing certificate.
    pub certificate: Vec<u8>,
    /// PEM or DER PKCS#8 private key. Zeroized on drop.
    pub private_key: Zeroizing<Vec<u8>>,
}

impl SigningIdentityInfo {
    /// Bundle a signing certificate with its private key.
    pub fn new(certificate: impl Into<Vec<u8>>, private_key: impl Into<Vec<u8>>) -> Self {
        Self {
            certificate: certificate.into(),
            private_key: Zeroizing::new(private_key.into()),
        }
    }
}

impl std::fmt::Debug for SigningIdentityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentityInfo")
            .field("certificate_len", &self.certificate.len())
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Everything needed to set up one MSP.
#[derive(Debug, Clone)]
pub struct MspConfig {
    /// Identifier of the organization this MSP speaks for.
    pub organization_id: OrganizationId,
    /// Root CA certificates (trust anchors).
    pub root_certs: Vec<Vec<u8>>,
    /// Intermediate CA certificates.
    pub intermediate_certs: Vec<Vec<u8>>,
    /// Certificates of the organization's administrators.
    pub admin_certs: Vec<Vec<u8>>,
    /// OU restriction. Empty means no restriction.
    pub organizational_unit_identifiers: Vec<OuIdentifier>,
    /// Default signer, if this process signs on behalf of the organization.
    pub signing_identity: Option<SigningIdentityInfo>,
}

impl MspConfig {
    /// An empty configuration for `organization_id`.
    pub fn new(organization_id: OrganizationId) -> Self {
        Self {
            organization_id,
            root_certs: Vec::new(),
            intermediate_certs: Vec::new(),
            admin_certs: Vec::new(),
            organizational_unit_identifiers: Vec::new(),
            signing_identity: None,
        }
    }

    /// Add a root certificate.
    pub fn with_root_cert(mut self, cert: impl Into<Vec<u8>>) -> Self {
        self.root_certs.push(cert.into());
        self
    }

    /// Add an intermediate certificate.
    pub fn with_intermediate_cert(mut self, cert: impl Into<Vec<u8>>) -> Self {
        self.intermediate_certs.push(cert.into());
        self
    }

    /// Add an administrator certificate.
    pub fn with_admin_cert(mut self, cert: impl Into<Vec<u8>>) -> Self {
        self.admin_certs.push(cert.into());
        self
    }

    /// Accept identities claiming `identifier`.
    pub fn with_organizational_unit(mut self, identifier: OuIdentifier) -> Self {
        self.organizational_unit_identifiers.push(identifier);
        self
    }

    /// Set the default signer.
    pub fn with_signing_identity(mut self, info: SigningIdentityInfo) -> Self {
        self.signing_identity = Some(info);
        self
    }
}
