//! # Parsed Certificates
//!
//! The provider-independent view of an X.509 certificate that the trust
//! core works with. A [`Certificate`] is immutable once built; every field
//! is read through an accessor.
//!
//! ## Canonical Encoding
//!
//! `raw()` is always the DER encoding, whatever form the certificate was
//! supplied in. Envelopes, admin lists and certifiers digests are all
//! computed over these bytes, so PEM armour or trailing whitespace in
//! configuration material never changes trust decisions.

/// Public-key algorithms understood by the trust core.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// ECDSA over NIST P-256. Key bytes are the uncompressed SEC1 point.
    EcdsaP256,
    /// Ed25519. Key bytes are the 32-byte compressed point.
    Ed25519,
    /// Any other SubjectPublicKeyInfo algorithm, by OID.
    Other(String),
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EcdsaP256 => f.write_str("ecdsa-p256"),
            Self::Ed25519 => f.write_str("ed25519"),
            Self::Other(oid) => write!(f, "other({oid})"),
        }
    }
}

/// Certificate signature algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// ecdsa-with-SHA256, DER-encoded `(r, s)`.
    EcdsaWithSha256,
    /// Ed25519 (PureEdDSA).
    Ed25519,
    /// Any other algorithm, by OID.
    Other(String),
}

impl SignatureAlgorithm {
    /// The issuer key algorithm able to produce this kind of signature.
    pub fn key_algorithm(&self) -> Option<KeyAlgorithm> {
        match self {
            Self::EcdsaWithSha256 => Some(KeyAlgorithm::EcdsaP256),
            Self::Ed25519 => Some(KeyAlgorithm::Ed25519),
            Self::Other(_) => None,
        }
    }
}

/// A public key together with its algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    algorithm: KeyAlgorithm,
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Create a public key from its algorithm and encoded bytes.
    pub fn new(algorithm: KeyAlgorithm, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            algorithm,
            bytes: bytes.into(),
        }
    }

    /// The key algorithm.
    pub fn algorithm(&self) -> &KeyAlgorithm {
        &self.algorithm
    }

    /// The encoded key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// The fields a provider extracts when it parses a certificate.
#[derive(Debug, Clone)]
pub struct CertificateParts {
    /// DER encoding of the whole certificate.
    pub raw: Vec<u8>,
    /// Subject distinguished name, rendered for humans.
    pub subject: String,
    /// Issuer distinguished name, rendered for humans.
    pub issuer: String,
    /// DER encoding of the subject name.
    pub subject_raw: Vec<u8>,
    /// DER encoding of the issuer name.
    pub issuer_raw: Vec<u8>,
    /// DER encoding of the TBSCertificate (the signed portion).
    pub tbs: Vec<u8>,
    /// Algorithm of the issuer's signature over `tbs`.
    pub signature_algorithm: SignatureAlgorithm,
    /// The issuer's signature over `tbs`.
    pub signature: Vec<u8>,
    /// The subject's public key.
    pub public_key: PublicKey,
    /// Whether basicConstraints marks the certificate as a CA.
    pub is_ca: bool,
    /// The subject's organizational-unit attribute values, in order.
    pub organizational_units: Vec<String>,
}

/// An immutable parsed certificate.
#[derive(Debug, Clone)]
pub struct Certificate {
    parts: CertificateParts,
}

impl Certificate {
    /// Build a certificate from parsed parts.
    pub fn from_parts(parts: CertificateParts) -> Self {
        Self { parts }
    }

    /// DER encoding of the certificate.
    pub fn raw(&self) -> &[u8] {
        &self.parts.raw
    }

    /// Subject distinguished name.
    pub fn subject(&self) -> &str {
        &self.parts.subject
    }

    /// Issuer distinguished name.
    pub fn issuer(&self) -> &str {
        &self.parts.issuer
    }

    /// DER encoding of the subject name.
    pub fn subject_raw(&self) -> &[u8] {
        &self.parts.subject_raw
    }

    /// DER encoding of the issuer name.
    pub fn issuer_raw(&self) -> &[u8] {
        &self.parts.issuer_raw
    }

    /// The signed TBSCertificate bytes.
    pub fn tbs(&self) -> &[u8] {
        &self.parts.tbs
    }

    /// Signature algorithm used by the issuer.
    pub fn signature_algorithm(&self) -> &SignatureAlgorithm {
        &self.parts.signature_algorithm
    }

    /// The issuer's signature over [`tbs`](Self::tbs).
    pub fn signature(&self) -> &[u8] {
        &self.parts.signature
    }

    /// The subject's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.parts.public_key
    }

    /// Whether the certificate is a certificate authority.
    pub fn is_ca(&self) -> bool {
        self.parts.is_ca
    }

    /// Organizational units claimed in the subject.
    pub fn organizational_units(&self) -> &[String] {
        &self.parts.organizational_units
    }

    /// Whether the subject and issuer names are identical.
    pub fn is_self_issued(&self) -> bool {
        self.parts.subject_raw == self.parts.issuer_raw
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.parts.raw == other.parts.raw
    }
}

impl Eq for Certificate {}

impl std::fmt::Display for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.parts.subject)
    }
}
