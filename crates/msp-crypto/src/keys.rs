//! # Private Signing Keys
//!
//! ## Security Invariant
//!
//! - A [`PrivateKey`] is never serialized and never printed. It does not
//!   implement `Serialize`, `Clone` or a revealing `Debug`.
//! - The wrapped dalek / p256 keys zeroize their scalar on drop.

use crate::certificate::{KeyAlgorithm, PublicKey};

pub(crate) enum KeyMaterial {
    EcdsaP256(p256::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
}

/// A private signing key held in process memory.
pub struct PrivateKey {
    pub(crate) material: KeyMaterial,
}

impl PrivateKey {
    /// Wrap a P-256 ECDSA signing key.
    pub fn from_ecdsa_p256(key: p256::ecdsa::SigningKey) -> Self {
        Self {
            material: KeyMaterial::EcdsaP256(key),
        }
    }

    /// Wrap an Ed25519 signing key.
    pub fn from_ed25519(key: ed25519_dalek::SigningKey) -> Self {
        Self {
            material: KeyMaterial::Ed25519(key),
        }
    }

    /// The algorithm of this key.
    pub fn algorithm(&self) -> KeyAlgorithm {
        match &self.material {
            KeyMaterial::EcdsaP256(_) => KeyAlgorithm::EcdsaP256,
            KeyMaterial::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// The public half, encoded the same way certificate parsing encodes it.
    pub fn public_key(&self) -> PublicKey {
        match &self.material {
            KeyMaterial::EcdsaP256(key) => {
                let point = key.verifying_key().to_encoded_point(false);
                PublicKey::new(KeyAlgorithm::EcdsaP256, point.as_bytes().to_vec())
            }
            KeyMaterial::Ed25519(key) => {
                PublicKey::new(KeyAlgorithm::Ed25519, key.verifying_key().to_bytes().to_vec())
            }
        }
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey({}, <private>)", self.algorithm())
    }
}
