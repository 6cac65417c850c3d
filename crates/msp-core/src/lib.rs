//! # msp-core — Foundational Types for the Membership Service Provider
//!
//! This crate is the leaf of the workspace. It defines the values that
//! cross process boundaries and the error hierarchy every other crate
//! reports through. It knows nothing about certificates beyond their raw
//! bytes and performs no cryptography.
//!
//! ## Key Design Principles
//!
//! 1. **Fixed byte layouts.** The identity envelope and the principal
//!    encoding are length-prefixed with a fixed field order. Equality of
//!    identities is equality of their encodings.
//!
//! 2. **Closed principal set.** [`Principal`] is an enum; evaluators match
//!    it exhaustively.
//!
//! 3. **Constant-time digest comparison.** [`CertifiersId`] equality goes
//!    through `subtle`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `msp-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

mod codec;

pub mod certifiers;
pub mod envelope;
pub mod error;
pub mod organization;
pub mod ou;
pub mod principal;

// Re-export primary types for ergonomic imports.
pub use certifiers::CertifiersId;
pub use envelope::SerializedIdentity;
pub use error::{
    ChainError, ConfigError, CryptoError, MspError, ParseError, PolicyError, RegistryError,
    TrustError,
};
pub use organization::OrganizationId;
pub use ou::{OrganizationalUnit, OuIdentifier};
pub use principal::{Principal, PrincipalClassification, ADMIN_ROLE};
