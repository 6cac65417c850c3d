//! # msp-crypto — Cryptographic Backend for the Membership Service Provider
//!
//! Provides the [`CryptoProvider`] seam and its in-process implementation,
//! [`SoftwareCryptoProvider`], along with the parsed [`Certificate`] model
//! the trust core consumes.
//!
//! ## Supported Algorithms
//!
//! | Concern            | Algorithm                       | Crate                     |
//! |--------------------|---------------------------------|---------------------------|
//! | Hash               | SHA-256                         | `sha2`                    |
//! | Signatures         | ECDSA P-256 / SHA-256 (DER sig) | `p256`                    |
//! | Signatures         | Ed25519                         | `ed25519-dalek`           |
//! | Certificates       | X.509 v3, PEM or DER            | `x509-parser`             |
//! | Private keys       | PKCS#8, PEM or DER              | `p256`, `ed25519-dalek`   |
//!
//! Private-key import uses the `pkcs8` and `pem` features of the two
//! signature crates.
//!
//! ## Crate Policy
//!
//! - Depends only on `msp-core` internally.
//! - No `unsafe` code.
//! - Private key bytes never leave [`PrivateKey`].

pub mod certificate;
pub mod keys;
pub mod provider;
pub mod sha256;
pub mod software;
mod x509;

pub use certificate::{Certificate, CertificateParts, KeyAlgorithm, PublicKey, SignatureAlgorithm};
pub use keys::PrivateKey;
pub use provider::{CryptoProvider, ProviderType};
pub use sha256::sha256;
pub use software::SoftwareCryptoProvider;
