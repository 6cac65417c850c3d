//! # Error Hierarchy
//!
//! Structured error types for the whole membership stack, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! The hierarchy follows the failure classes of the trust core:
//!
//! - [`ConfigError`] — malformed or incomplete MSP configuration. Fatal at
//!   setup; the MSP never becomes ready.
//! - [`ParseError`] — malformed envelope, certificate or principal bytes.
//!   Local to one call.
//! - [`TrustError`] — chain or organizational-unit failures. The caller
//!   rejects the identity.
//! - [`PolicyError`] — a principal is not satisfied. Expected and frequent.
//! - [`RegistryError`] — manager-level routing failures.
//! - [`CryptoError`] — failures reported by the cryptographic provider.
//!
//! Nothing in this stack retries: every operation is deterministic, so a
//! second attempt with the same input yields the same error.

use thiserror::Error;

/// Top-level error type for MSP operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MspError {
    /// The MSP configuration is unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input bytes could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The identity is not trusted by this MSP.
    #[error("trust error: {0}")]
    Trust(#[from] TrustError),

    /// The identity does not satisfy the requested principal.
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),

    /// The MSP manager could not route the request.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The cryptographic provider reported a failure.
    #[error("cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    /// The MSP was set up without a default signing identity.
    #[error("no default signing identity is configured for MSP \"{0}\"")]
    NoDefaultIdentity(String),
}

/// Errors detected while setting up an MSP from its configuration.
///
/// Every variant is an invalid configuration; the variant says which part.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The organization identifier is empty.
    #[error("organization identifier must be non-empty")]
    EmptyOrganizationId,

    /// Neither root nor intermediate certificates were supplied.
    #[error("MSP \"{0}\" has neither root nor intermediate certificates")]
    NoTrustAnchors(String),

    /// A certificate or key in the configuration could not be parsed.
    #[error("malformed {kind} material at index {index}: {reason}")]
    MalformedMaterial {
        /// Which configuration set the material came from (e.g. "root certificate").
        kind: String,
        /// Position of the material within its set.
        index: usize,
        /// Parser diagnostic.
        reason: String,
    },

    /// An intermediate certificate does not chain to any configured root.
    #[error("intermediate certificate \"{subject}\" does not chain to a root: {reason}")]
    UntrustedIntermediate {
        /// Subject of the offending intermediate.
        subject: String,
        /// Why chain construction failed.
        reason: ChainError,
    },

    /// The configured private key does not belong to the signing certificate.
    #[error("signing key does not match the public key of certificate \"{0}\"")]
    SigningKeyMismatch(String),
}

/// Errors decoding envelopes, certificates or principals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The serialized identity envelope is truncated or malformed.
    #[error("malformed identity envelope: {0}")]
    MalformedEnvelope(String),

    /// The certificate carried by an envelope could not be parsed.
    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),

    /// The encoded principal is truncated, malformed, or of unknown class.
    #[error("malformed principal: {0}")]
    MalformedPrincipal(String),
}

/// Reasons certification-chain construction can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// No configured certificate issued the current certificate.
    #[error("no path to a trust anchor from \"{subject}\"")]
    NoPathToTrustAnchor {
        /// Subject of the certificate whose issuer could not be resolved.
        subject: String,
    },

    /// A certificate reappeared while walking up the chain.
    #[error("certificate \"{subject}\" appears twice in the chain")]
    CycleDetected {
        /// Subject of the repeated certificate.
        subject: String,
    },

    /// The chain grew beyond the permitted depth.
    #[error("certification chain exceeds the maximum depth of {max_depth}")]
    MaxDepthExceeded {
        /// The depth bound that was hit.
        max_depth: usize,
    },
}

/// Reasons an identity is not trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrustError {
    /// No certification chain to a trust anchor could be built.
    #[error("identity is untrusted: {0}")]
    Untrusted(#[from] ChainError),

    /// The identity belongs to a different organization than the MSP.
    #[error("organization mismatch: expected \"{expected}\", found \"{found}\"")]
    OrganizationMismatch {
        /// This MSP's organization identifier.
        expected: String,
        /// The organization identifier carried by the input.
        found: String,
    },

    /// None of the identity's organizational units is accepted by the MSP.
    #[error("identity \"{subject}\" holds none of the organizational units accepted by this MSP")]
    OrganizationalUnitMismatch {
        /// Subject of the rejected identity.
        subject: String,
    },

    /// The identity's certificate is a certificate authority, not a member.
    #[error("certificate \"{0}\" is a certificate authority and cannot act as an identity")]
    CertificateAuthorityIdentity(String),
}

/// Reasons a principal is not satisfied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A role principal was not satisfied.
    #[error("role \"{role}\" of organization \"{organization}\" is not satisfied")]
    RoleNotSatisfied {
        /// The requested role name.
        role: String,
        /// The organization named by the principal.
        organization: String,
    },

    /// An organizational-unit principal was not satisfied.
    #[error("organizational unit \"{unit}\" of organization \"{organization}\" is not satisfied")]
    OrganizationalUnitNotSatisfied {
        /// The requested unit identifier.
        unit: String,
        /// The organization named by the principal.
        organization: String,
    },

    /// An exact-identity principal names a different identity.
    #[error("identity does not match the principal's serialized identity")]
    IdentityMismatch,
}

/// Manager-level routing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two MSPs were registered under the same organization identifier.
    #[error("organization \"{0}\" is registered more than once")]
    DuplicateOrganization(String),

    /// No MSP is registered for the requested organization.
    #[error("no MSP is registered for organization \"{0}\"")]
    UnknownOrganization(String),
}

/// Errors reported by a cryptographic provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A signature did not verify under the given public key.
    #[error("signature verification failed")]
    InvalidSignature,

    /// The private key could not produce a signature.
    #[error("signing failed: {0}")]
    SigningError(String),

    /// The key or signature algorithm is not supported by the provider.
    #[error("unsupported key: {0}")]
    UnsupportedKey(String),

    /// Certificate bytes could not be parsed.
    #[error("certificate parse failed: {0}")]
    CertificateParse(String),

    /// Private key material could not be imported.
    #[error("private key import failed: {0}")]
    KeyImport(String),
}
