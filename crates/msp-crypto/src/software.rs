//! # Software Crypto Provider
//!
//! In-process implementation of [`CryptoProvider`]:
//!
//! - SHA-256 via `sha2`.
//! - ECDSA P-256 with SHA-256 via `p256`. Signatures are DER-encoded.
//! - Ed25519 via `ed25519-dalek`, verified with `verify_strict`.
//!
//! ## Security
//!
//! - Key material lives in process memory, protected by OS isolation only.
//! - ECDSA signatures are accepted in either S form; low-S is not enforced.

use ed25519_dalek::pkcs8::DecodePrivateKey as _;
use msp_core::CryptoError;

use crate::certificate::{Certificate, KeyAlgorithm, PublicKey};
use crate::keys::{KeyMaterial, PrivateKey};
use crate::provider::{CryptoProvider, ProviderType};
use crate::sha256::sha256;
use crate::x509;

/// In-process provider backed by `sha2`, `p256` and `ed25519-dalek`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareCryptoProvider;

impl SoftwareCryptoProvider {
    /// Create the software provider.
    pub fn new() -> Self {
        Self
    }
}

impl CryptoProvider for SoftwareCryptoProvider {
    fn hash(&self, data: &[u8]) -> Vec<u8> {
        sha256(data).to_vec()
    }

    fn sign(&self, key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match &key.material {
            KeyMaterial::EcdsaP256(signing_key) => {
                let signature: p256::ecdsa::Signature =
                    p256::ecdsa::signature::Signer::try_sign(signing_key, message)
                        .map_err(|e| CryptoError::SigningError(e.to_string()))?;
                Ok(signature.to_der().as_bytes().to_vec())
            }
            KeyMaterial::Ed25519(signing_key) => {
                let signature = ed25519_dalek::Signer::try_sign(signing_key, message)
                    .map_err(|e| CryptoError::SigningError(e.to_string()))?;
                Ok(signature.to_bytes().to_vec())
            }
        }
    }

    fn verify(&self, key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        match key.algorithm() {
            KeyAlgorithm::EcdsaP256 => {
                let Ok(verifying_key) = p256::ecdsa::VerifyingKey::from_sec1_bytes(key.as_bytes())
                else {
                    return false;
                };
                let Ok(signature) = p256::ecdsa::Signature::from_der(signature) else {
                    return false;
                };
                p256::ecdsa::signature::Verifier::verify(&verifying_key, message, &signature)
                    .is_ok()
            }
            KeyAlgorithm::Ed25519 => {
                let Ok(key_bytes) = <[u8; 32]>::try_from(key.as_bytes()) else {
                    return false;
                };
                let Ok(verifying_key) = ed25519_dalek::VerifyingKey::from_bytes(&key_bytes) else {
                    return false;
                };
                let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
                    return false;
                };
                verifying_key.verify_strict(message, &signature).is_ok()
            }
            KeyAlgorithm::Other(_) => false,
        }
    }

    fn parse_certificate(&self, material: &[u8]) -> Result<Certificate, CryptoError> {
        x509::parse_certificate(material)
    }

    fn import_private_key(&self, material: &[u8]) -> Result<PrivateKey, CryptoError> {
        let pem = if x509::is_pem(material) {
            Some(std::str::from_utf8(material).map_err(|_| {
                CryptoError::KeyImport("PEM private key is not valid UTF-8".to_string())
            })?)
        } else {
            None
        };

        let ecdsa = match pem {
            Some(text) => p256::ecdsa::SigningKey::from_pkcs8_pem(text),
            None => p256::ecdsa::SigningKey::from_pkcs8_der(material),
        };
        if let Ok(key) = ecdsa {
            return Ok(PrivateKey::from_ecdsa_p256(key));
        }

        let ed25519 = match pem {
            Some(text) => ed25519_dalek::SigningKey::from_pkcs8_pem(text),
            None => ed25519_dalek::SigningKey::from_pkcs8_der(material),
        };
        if let Ok(key) = ed25519 {
            return Ok(PrivateKey::from_ed25519(key));
        }

        Err(CryptoError::KeyImport(
            "material is neither a PKCS#8 P-256 nor a PKCS#8 Ed25519 private key".to_string(),
        ))
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Software
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SoftwareCryptoProvider {
        SoftwareCryptoProvider::new()
    }

    #[test]
    fn hash_is_sha256() {
        assert_eq!(provider().hash(b"abc"), sha256(b"abc").to_vec());
        assert_eq!(provider().hash(b"").len(), 32);
    }

    #[test]
    fn ecdsa_sign_verify_with_imported_pkcs8() {
        let generated = rcgen::KeyPair::generate().unwrap();
        let key = provider().import_private_key(&generated.serialize_der()).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::EcdsaP256);

        let signature = provider().sign(&key, b"proposal").unwrap();
        assert!(provider().verify(&key.public_key(), b"proposal", &signature));
        assert!(!provider().verify(&key.public_key(), b"tampered", &signature));
    }

    #[test]
    fn ed25519_sign_verify_with_imported_pem() {
        let generated = rcgen::KeyPair::generate_for(&rcgen::PKCS_ED25519).unwrap();
        let key = provider()
            .import_private_key(generated.serialize_pem().as_bytes())
            .unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Ed25519);

        let signature = provider().sign(&key, b"tx").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(provider().verify(&key.public_key(), b"tx", &signature));

        let mut flipped = signature.clone();
        flipped[0] ^= 0x01;
        assert!(!provider().verify(&key.public_key(), b"tx", &flipped));
    }

    #[test]
    fn verify_is_false_for_malformed_inputs() {
        let key = PrivateKey::from_ed25519(ed25519_dalek::SigningKey::from_bytes(&[3u8; 32]));
        let pk = key.public_key();
        assert!(!provider().verify(&pk, b"m", &[0u8; 10]));
        assert!(!provider().verify(&PublicKey::new(KeyAlgorithm::Ed25519, vec![1, 2]), b"m", &[0u8; 64]));
        assert!(!provider().verify(&PublicKey::new(KeyAlgorithm::EcdsaP256, vec![4; 65]), b"m", &[0x30, 0]));
        assert!(!provider().verify(
            &PublicKey::new(KeyAlgorithm::Other("1.2.3".to_string()), vec![]),
            b"m",
            &[]
        ));
    }

    #[test]
    fn signature_from_other_algorithm_does_not_verify() {
        let ecdsa = provider()
            .import_private_key(&rcgen::KeyPair::generate().unwrap().serialize_der())
            .unwrap();
        let ed = PrivateKey::from_ed25519(ed25519_dalek::SigningKey::from_bytes(&[9u8; 32]));
        let signature = provider().sign(&ecdsa, b"m").unwrap();
        assert!(!provider().verify(&ed.public_key(), b"m", &signature));
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(matches!(
            provider().import_private_key(b"not a key"),
            Err(CryptoError::KeyImport(_))
        ));
        assert!(provider().import_private_key(&[]).is_err());
    }

    #[test]
    fn reports_software_type() {
        assert_eq!(provider().provider_type(), ProviderType::Software);
        assert_eq!(ProviderType::Software.to_string(), "software");
    }
}
