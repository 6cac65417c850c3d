//! # msp-identity — The Membership Service Provider Trust Core
//!
//! Implements identities, certification-chain construction, certifiers
//! fingerprinting, principal evaluation, the per-organization [`Msp`] and
//! the multi-organization [`MspManager`].
//!
//! ## Data Flow
//!
//! ```text
//! bytes ──▶ MspManager ──peek org──▶ Msp<Ready>::deserialize_identity ──▶ Identity
//!                                         │
//!                    validate ◀───────────┤───────────▶ satisfies_principal
//!           (ChainBuilder, certifiers id)              (Role / OU / ExactIdentity)
//! ```
//!
//! ## Crate Policy
//!
//! - All cryptography goes through `msp_crypto::CryptoProvider`.
//! - Configuration is immutable after setup; there are no process globals.
//! - Policy failures are logged at `debug`, never as anomalies.

pub mod chain;
pub mod config;
pub mod fingerprint;
pub mod identity;
pub mod manager;
pub mod msp;
mod principal;

#[cfg(test)]
mod test_pki;

pub use chain::{CertificationChain, ChainBuilder, MAX_CHAIN_DEPTH};
pub use config::{MspConfig, SigningIdentityInfo};
pub use fingerprint::certifiers_identifier;
pub use identity::{Identity, SigningIdentity};
pub use manager::MspManager;
pub use msp::{Msp, MspState, Ready, Uninitialized};
