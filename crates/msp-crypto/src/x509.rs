//! # X.509 Parsing
//!
//! Converts PEM or DER input into a [`Certificate`] using `x509-parser`.
//! Only the fields the trust core consumes are extracted; validity periods
//! and extensions other than basicConstraints are ignored.

use msp_core::CryptoError;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use x509_parser::certificate::X509Certificate;

use crate::certificate::{Certificate, CertificateParts, KeyAlgorithm, PublicKey, SignatureAlgorithm};

const OID_ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
const OID_ED25519: &str = "1.3.101.112";

const PEM_CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Whether `material` looks like PEM armour rather than DER.
pub(crate) fn is_pem(material: &[u8]) -> bool {
    let trimmed = material
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|start| &material[start..])
        .unwrap_or_default();
    trimmed.starts_with(b"-----BEGIN")
}

/// Parse a single certificate from PEM or DER.
pub(crate) fn parse_certificate(material: &[u8]) -> Result<Certificate, CryptoError> {
    let der = if is_pem(material) {
        let (rest, pem) = x509_parser::pem::parse_x509_pem(material)
            .map_err(|e| CryptoError::CertificateParse(format!("invalid PEM: {e}")))?;
        if !rest.iter().all(u8::is_ascii_whitespace) {
            return Err(CryptoError::CertificateParse(
                "unexpected material after PEM certificate; supply one certificate per file"
                    .to_string(),
            ));
        }
        if pem.label != PEM_CERTIFICATE_LABEL {
            return Err(CryptoError::CertificateParse(format!(
                "expected PEM label {PEM_CERTIFICATE_LABEL}, found {}",
                pem.label
            )));
        }
        pem.contents
    } else {
        material.to_vec()
    };

    let (rest, cert) = x509_parser::parse_x509_certificate(&der)
        .map_err(|e| CryptoError::CertificateParse(format!("invalid certificate DER: {e}")))?;
    if !rest.is_empty() {
        return Err(CryptoError::CertificateParse(format!(
            "{} trailing bytes after certificate",
            rest.len()
        )));
    }

    let parts = CertificateParts {
        subject: cert.subject().to_string(),
        issuer: cert.issuer().to_string(),
        subject_raw: cert.subject().as_raw().to_vec(),
        issuer_raw: cert.issuer().as_raw().to_vec(),
        tbs: cert.tbs_certificate.as_ref().to_vec(),
        signature_algorithm: signature_algorithm(&cert),
        signature: cert.signature_value.data.to_vec(),
        public_key: public_key(&cert)?,
        is_ca: cert.is_ca(),
        organizational_units: organizational_units(&cert)?,
        raw: der.clone(),
    };
    Ok(Certificate::from_parts(parts))
}

fn signature_algorithm(cert: &X509Certificate<'_>) -> SignatureAlgorithm {
    let oid = cert.signature_algorithm.algorithm.to_id_string();
    match oid.as_str() {
        OID_ECDSA_WITH_SHA256 => SignatureAlgorithm::EcdsaWithSha256,
        OID_ED25519 => SignatureAlgorithm::Ed25519,
        _ => SignatureAlgorithm::Other(oid),
    }
}

fn public_key(cert: &X509Certificate<'_>) -> Result<PublicKey, CryptoError> {
    let spki = cert.public_key();
    let oid = spki.algorithm.algorithm.to_id_string();
    let data = spki.subject_public_key.data.as_ref();
    match oid.as_str() {
        OID_EC_PUBLIC_KEY => {
            // Normalise to the uncompressed point so keys compare byte-wise.
            let key = p256::PublicKey::from_sec1_bytes(data).map_err(|_| {
                CryptoError::UnsupportedKey("EC public key is not a P-256 point".to_string())
            })?;
            Ok(PublicKey::new(
                KeyAlgorithm::EcdsaP256,
                key.to_encoded_point(false).as_bytes().to_vec(),
            ))
        }
        OID_ED25519 => {
            if data.len() != 32 {
                return Err(CryptoError::UnsupportedKey(format!(
                    "Ed25519 public key must be 32 bytes, got {}",
                    data.len()
                )));
            }
            Ok(PublicKey::new(KeyAlgorithm::Ed25519, data.to_vec()))
        }
        _ => Ok(PublicKey::new(KeyAlgorithm::Other(oid), data.to_vec())),
    }
}

fn organizational_units(cert: &X509Certificate<'_>) -> Result<Vec<String>, CryptoError> {
    cert.subject()
        .iter_organizational_unit()
        .map(|attr| {
            attr.as_str().map(str::to_string).map_err(|e| {
                CryptoError::CertificateParse(format!("organizational unit is not a string: {e}"))
            })
        })
        .collect()
}
