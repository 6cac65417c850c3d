//! # Identities
//!
//! An [`Identity`] is a parsed certificate bound to the organization of the
//! MSP that produced it. A [`SigningIdentity`] adds an exclusively-owned
//! private key.
//!
//! ## Security Invariant
//!
//! - Equality is equality of the serialized envelope. Two identities with
//!   the same certificate but different organizations are different.
//! - The organization of an identity is fixed at construction and always
//!   that of its MSP.
//! - A [`SigningIdentity`] never serializes, clones or prints its key.

use std::sync::{Arc, OnceLock};

use msp_core::{
    CryptoError, MspError, OrganizationId, OrganizationalUnit, Principal, SerializedIdentity,
};
use msp_crypto::{Certificate, PrivateKey};

use crate::msp::MspContext;
use crate::principal;

/// A certificate-backed identity owned by one MSP.
#[derive(Clone)]
pub struct Identity {
    context: Arc<MspContext>,
    certificate: Certificate,
    serialized: Vec<u8>,
    organizational_units: OnceLock<Result<Vec<OrganizationalUnit>, MspError>>,
}

impl Identity {
    pub(crate) fn new(context: Arc<MspContext>, certificate: Certificate) -> Self {
        let serialized =
            SerializedIdentity::new(context.organization_id.clone(), certificate.raw()).encode();
        Self {
            context,
            certificate,
            serialized,
            organizational_units: OnceLock::new(),
        }
    }

    /// Organization this identity belongs to.
    pub fn organization_id(&self) -> &OrganizationId {
        &self.context.organization_id
    }

    /// The identity's certificate.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// The serialized envelope `{organization id, certificate DER}`.
    pub fn serialize(&self) -> Vec<u8> {
        self.serialized.clone()
    }

    /// Borrow the serialized envelope.
    pub fn as_serialized(&self) -> &[u8] {
        &self.serialized
    }

    /// Verify `signature` over `message` with this identity's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), MspError> {
        if self
            .context
            .provider
            .verify(self.certificate.public_key(), message, signature)
        {
            Ok(())
        } else {
            Err(CryptoError::InvalidSignature.into())
        }
    }

    /// The public identity. For a plain identity this is itself.
    pub fn public_version(&self) -> &Identity {
        self
    }

    /// Organizational units claimed by the certificate, each bound to the
    /// certifiers identifier of the identity's chain.
    ///
    /// Empty when the certificate claims no unit. Fails when the chain to a
    /// trust anchor cannot be built. Computed once and cached.
    pub fn organizational_units(&self) -> Result<&[OrganizationalUnit], MspError> {
        self.organizational_units
            .get_or_init(|| self.context.organizational_units(&self.certificate))
            .as_ref()
            .map(Vec::as_slice)
            .map_err(Clone::clone)
    }

    /// Organizational units as seen by `context`, reusing the cache when
    /// `context` is the one this identity was deserialized by.
    pub(crate) fn organizational_units_in(
        &self,
        context: &Arc<MspContext>,
    ) -> Result<Vec<OrganizationalUnit>, MspError> {
        if Arc::ptr_eq(&self.context, context) {
            self.organizational_units().map(<[_]>::to_vec)
        } else {
            context.organizational_units(&self.certificate)
        }
    }

    /// Whether this identity satisfies `principal` according to its MSP.
    pub fn satisfies_principal(&self, principal: &Principal) -> Result<(), MspError> {
        principal::evaluate(&self.context, self, principal)
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.serialized == other.serialized
    }
}

impl Eq for Identity {}

impl std::hash::Hash for Identity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.serialized.hash(state);
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("organization_id", self.organization_id())
            .field("subject", &self.certificate.subject())
            .finish()
    }
}

/// An identity that can sign.
pub struct SigningIdentity {
    identity: Identity,
    key: PrivateKey,
}

impl SigningIdentity {
    pub(crate) fn new(identity: Identity, key: PrivateKey) -> Self {
        Self { identity, key }
    }

    /// Sign `message` with the identity's private key.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, MspError> {
        self.identity
            .context
            .provider
            .sign(&self.key, message)
            .map_err(MspError::from)
    }

    /// The public half of this signing identity.
    pub fn public_version(&self) -> &Identity {
        &self.identity
    }

    /// Organization this identity belongs to.
    pub fn organization_id(&self) -> &OrganizationId {
        self.identity.organization_id()
    }

    /// The serialized envelope of the public half.
    pub fn serialize(&self) -> Vec<u8> {
        self.identity.serialize()
    }

    /// The signing certificate.
    pub fn certificate(&self) -> &Certificate {
        self.identity.certificate()
    }

    /// See [`Identity::verify`].
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), MspError> {
        self.identity.verify(message, signature)
    }

    /// See [`Identity::organizational_units`].
    pub fn organizational_units(&self) -> Result<&[OrganizationalUnit], MspError> {
        self.identity.organizational_units()
    }

    /// See [`Identity::satisfies_principal`].
    pub fn satisfies_principal(&self, principal: &Principal) -> Result<(), MspError> {
        self.identity.satisfies_principal(principal)
    }
}

impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("identity", &self.identity)
            .field("key", &"<redacted>")
            .finish()
    }
}
