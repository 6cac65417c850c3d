//! # Membership Service Provider
//!
//! One MSP per organization. It owns the organization's trust anchors,
//! administrator list and organizational-unit restriction, and answers
//! three questions about an identity: is it trusted, can it sign, and does
//! it satisfy a principal.
//!
//! ## Lifecycle
//!
//! ```text
//! Msp<Uninitialized> ──setup(config)──▶ Msp<Ready>
//! ```
//!
//! Each state is a distinct type. Queries exist only on `Msp<Ready>`, so a
//! query before setup does not compile. Setup consumes the uninitialized
//! MSP, which makes a second setup on the same value impossible.
//!
//! ## Concurrency
//!
//! `Msp<Ready>` is `Clone + Send + Sync`. Its configuration is immutable and
//! shared behind an `Arc` with every identity it deserializes, so
//! validation and deserialization run in parallel without locks.

use std::sync::Arc;

use msp_core::{
    ChainError, ConfigError, CryptoError, MspError, OrganizationId, OrganizationalUnit,
    OuIdentifier, ParseError, Principal, SerializedIdentity, TrustError,
};
use msp_crypto::{Certificate, CryptoProvider, SoftwareCryptoProvider};

use crate::chain::{CertificationChain, ChainBuilder, MAX_CHAIN_DEPTH};
use crate::config::{MspConfig, SigningIdentityInfo};
use crate::fingerprint::certifiers_identifier;
use crate::identity::{Identity, SigningIdentity};
use crate::principal;

// ── State Types ──────────────────────────────────────────────────────

/// An MSP that has not been configured yet.
#[derive(Debug, Clone)]
pub struct Uninitialized {
    provider: Arc<dyn CryptoProvider>,
    max_chain_depth: usize,
}

/// A configured MSP that accepts queries.
#[derive(Debug, Clone)]
pub struct Ready {
    context: Arc<MspContext>,
    signer: Option<Arc<SigningIdentity>>,
}

/// Marker trait for MSP lifecycle states. Sealed.
pub trait MspState: private::Sealed + std::fmt::Debug {
    /// State name for diagnostics.
    fn name() -> &'static str;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Uninitialized {}
    impl Sealed for super::Ready {}
}

impl MspState for Uninitialized {
    fn name() -> &'static str {
        "UNINITIALIZED"
    }
}

impl MspState for Ready {
    fn name() -> &'static str {
        "READY"
    }
}

// ── Shared Context ───────────────────────────────────────────────────

/// Immutable state of a ready MSP, shared with its identities.
pub(crate) struct MspContext {
    pub(crate) organization_id: OrganizationId,
    pub(crate) provider: Arc<dyn CryptoProvider>,
    pub(crate) trust_anchors: Vec<Certificate>,
    pub(crate) intermediates: Vec<Certificate>,
    /// Serialized envelopes of the administrators.
    pub(crate) admins: Vec<Vec<u8>>,
    pub(crate) ou_identifiers: Vec<OuIdentifier>,
    pub(crate) max_chain_depth: usize,
}

impl MspContext {
    fn chain_builder(&self) -> ChainBuilder<'_> {
        ChainBuilder::new(self.provider.as_ref()).with_max_depth(self.max_chain_depth)
    }

    pub(crate) fn build_chain(&self, cert: &Certificate) -> Result<CertificationChain, ChainError> {
        self.chain_builder()
            .build(cert, &self.trust_anchors, &self.intermediates)
    }

    fn units_for_chain(&self, chain: &CertificationChain) -> Vec<OrganizationalUnit> {
        let claims = chain.leaf().organizational_units();
        if claims.is_empty() {
            return Vec::new();
        }
        let certifiers = certifiers_identifier(self.provider.as_ref(), chain);
        claims
            .iter()
            .map(|unit| OrganizationalUnit {
                unit_identifier: unit.clone(),
                organization_id: self.organization_id.clone(),
                certifiers_identifier: certifiers.clone(),
            })
            .collect()
    }

    pub(crate) fn organizational_units(
        &self,
        cert: &Certificate,
    ) -> Result<Vec<OrganizationalUnit>, MspError> {
        if cert.organizational_units().is_empty() {
            return Ok(Vec::new());
        }
        let chain = self.build_chain(cert).map_err(TrustError::from)?;
        Ok(self.units_for_chain(&chain))
    }
}

impl std::fmt::Debug for MspContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MspContext")
            .field("organization_id", &self.organization_id)
            .field("provider", &self.provider.provider_type())
            .field("trust_anchors", &self.trust_anchors.len())
            .field("intermediates", &self.intermediates.len())
            .field("admins", &self.admins.len())
            .field("ou_identifiers", &self.ou_identifiers.len())
            .finish()
    }
}

// ── MSP ──────────────────────────────────────────────────────────────

/// A Membership Service Provider in lifecycle state `S`.
#[derive(Debug, Clone)]
pub struct Msp<S: MspState> {
    state: S,
}

impl<S: MspState> Msp<S> {
    /// Name of the current lifecycle state.
    pub fn state_name(&self) -> &'static str {
        S::name()
    }
}

impl Msp<Uninitialized> {
    /// Create an MSP that will use `provider` for all cryptography.
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        Self {
            state: Uninitialized {
                provider,
                max_chain_depth: MAX_CHAIN_DEPTH,
            },
        }
    }

    /// Create an MSP backed by [`SoftwareCryptoProvider`].
    pub fn software() -> Self {
        Self::new(Arc::new(SoftwareCryptoProvider::new()))
    }

    /// Bound certification chains to `max_depth` certificates.
    pub fn with_max_chain_depth(mut self, max_depth: usize) -> Self {
        self.state.max_chain_depth = max_depth.max(1);
        self
    }

    /// Configure the MSP.
    ///
    /// Parses every certificate, vets intermediates against the roots,
    /// derives the admin envelopes and imports the default signer. Any
    /// failure leaves no usable MSP behind.
    pub fn setup(self, config: MspConfig) -> Result<Msp<Ready>, MspError> {
        let Uninitialized {
            provider,
            max_chain_depth,
        } = self.state;
        let organization_id = config.organization_id.clone();

        if config.root_certs.is_empty() && config.intermediate_certs.is_empty() {
            return Err(ConfigError::NoTrustAnchors(organization_id.to_string()).into());
        }

        let roots = parse_all(provider.as_ref(), "root certificate", &config.root_certs)?;
        let intermediates = parse_all(
            provider.as_ref(),
            "intermediate certificate",
            &config.intermediate_certs,
        )?;

        // Without roots, the intermediates themselves are the anchors.
        let (trust_anchors, intermediates) = if roots.is_empty() {
            tracing::warn!(
                organization = %organization_id,
                "no root certificates configured; intermediates act as trust anchors"
            );
            (intermediates, Vec::new())
        } else {
            let builder =
                ChainBuilder::new(provider.as_ref()).with_max_depth(max_chain_depth);
            for intermediate in &intermediates {
                builder
                    .build(intermediate, &roots, &intermediates)
                    .map_err(|reason| ConfigError::UntrustedIntermediate {
                        subject: intermediate.subject().to_string(),
                        reason,
                    })?;
            }
            (roots, intermediates)
        };

        let admins = parse_all(provider.as_ref(), "admin certificate", &config.admin_certs)?
            .iter()
            .map(|cert| SerializedIdentity::new(organization_id.clone(), cert.raw()).encode())
            .collect::<Vec<_>>();

        let context = Arc::new(MspContext {
            organization_id,
            provider,
            trust_anchors,
            intermediates,
            admins,
            ou_identifiers: config.organizational_unit_identifiers.clone(),
            max_chain_depth,
        });

        let signer = config
            .signing_identity
            .as_ref()
            .map(|info| load_signer(&context, info))
            .transpose()?
            .map(Arc::new);

        tracing::info!(
            organization = %context.organization_id,
            trust_anchors = context.trust_anchors.len(),
            intermediates = context.intermediates.len(),
            admins = context.admins.len(),
            organizational_units = context.ou_identifiers.len(),
            signer = signer.is_some(),
            "MSP set up"
        );

        Ok(Msp {
            state: Ready { context, signer },
        })
    }
}

impl Msp<Ready> {
    /// The organization this MSP speaks for.
    pub fn organization_id(&self) -> &OrganizationId {
        &self.state.context.organization_id
    }

    /// The crypto provider configured at setup.
    pub fn provider(&self) -> &dyn CryptoProvider {
        self.state.context.provider.as_ref()
    }

    /// Certificates chains must end at.
    pub fn trust_anchors(&self) -> &[Certificate] {
        &self.state.context.trust_anchors
    }

    /// Intermediate certificates available for chain building.
    pub fn intermediates(&self) -> &[Certificate] {
        &self.state.context.intermediates
    }

    /// Serialized envelopes of the administrators.
    pub fn admin_identities(&self) -> &[Vec<u8>] {
        &self.state.context.admins
    }

    /// Configured OU restriction.
    pub fn organizational_unit_identifiers(&self) -> &[OuIdentifier] {
        &self.state.context.ou_identifiers
    }

    /// The default signer configured at setup.
    pub fn default_signing_identity(&self) -> Result<Arc<SigningIdentity>, MspError> {
        self.state
            .signer
            .clone()
            .ok_or_else(|| MspError::NoDefaultIdentity(self.organization_id().to_string()))
    }

    /// Decode an envelope produced for this MSP's organization.
    ///
    /// Envelopes of other organizations are rejected; route those through
    /// [`MspManager`](crate::MspManager). The embedded certificate must be
    /// canonical DER.
    pub fn deserialize_identity(&self, bytes: &[u8]) -> Result<Identity, MspError> {
        let envelope = SerializedIdentity::decode(bytes)?;
        let context = &self.state.context;
        if envelope.organization_id != context.organization_id {
            return Err(TrustError::OrganizationMismatch {
                expected: context.organization_id.to_string(),
                found: envelope.organization_id.to_string(),
            }
            .into());
        }

        let certificate = context
            .provider
            .parse_certificate(&envelope.certificate)
            .map_err(|e| ParseError::MalformedCertificate(e.to_string()))?;
        if certificate.raw() != envelope.certificate.as_slice() {
            return Err(ParseError::MalformedCertificate(
                "certificate is not canonical DER".to_string(),
            )
            .into());
        }

        Ok(Identity::new(Arc::clone(context), certificate))
    }

    /// Check that `identity` is trusted by this MSP.
    ///
    /// The identity must belong to this organization, chain to a trust
    /// anchor, not be a CA certificate, and, when an OU restriction is
    /// configured, claim one of the configured `(unit, certifiers)` pairs.
    pub fn validate(&self, identity: &Identity) -> Result<(), MspError> {
        let result = self.check_trust(identity);
        if let Err(error) = &result {
            tracing::debug!(
                organization = %self.organization_id(),
                subject = identity.certificate().subject(),
                %error,
                "identity rejected"
            );
        }
        result
    }

    fn check_trust(&self, identity: &Identity) -> Result<(), MspError> {
        let context = &self.state.context;
        if identity.organization_id() != &context.organization_id {
            return Err(TrustError::OrganizationMismatch {
                expected: context.organization_id.to_string(),
                found: identity.organization_id().to_string(),
            }
            .into());
        }

        let certificate = identity.certificate();
        let chain = context
            .build_chain(certificate)
            .map_err(TrustError::from)?;

        if certificate.is_ca() {
            return Err(
                TrustError::CertificateAuthorityIdentity(certificate.subject().to_string()).into(),
            );
        }

        if !context.ou_identifiers.is_empty() {
            let units = context.units_for_chain(&chain);
            let permitted = units
                .iter()
                .any(|unit| context.ou_identifiers.iter().any(|id| id.matches(unit)));
            if !permitted {
                return Err(TrustError::OrganizationalUnitMismatch {
                    subject: certificate.subject().to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Whether `identity` satisfies `principal` under this MSP.
    pub fn satisfies_principal(
        &self,
        identity: &Identity,
        principal: &Principal,
    ) -> Result<(), MspError> {
        principal::evaluate(&self.state.context, identity, principal)
    }
}

fn parse_all(
    provider: &dyn CryptoProvider,
    kind: &str,
    materials: &[Vec<u8>],
) -> Result<Vec<Certificate>, ConfigError> {
    materials
        .iter()
        .enumerate()
        .map(|(index, material)| {
            provider
                .parse_certificate(material)
                .map_err(|e| malformed(kind, index, e))
        })
        .collect()
}

fn malformed(kind: &str, index: usize, error: CryptoError) -> ConfigError {
    ConfigError::MalformedMaterial {
        kind: kind.to_string(),
        index,
        reason: error.to_string(),
    }
}

fn load_signer(
    context: &Arc<MspContext>,
    info: &SigningIdentityInfo,
) -> Result<SigningIdentity, MspError> {
    let provider = context.provider.as_ref();
    let certificate = provider
        .parse_certificate(&info.certificate)
        .map_err(|e| malformed("signing certificate", 0, e))?;
    let key = provider
        .import_private_key(&info.private_key)
        .map_err(|e| malformed("signing key", 0, e))?;

    if &key.public_key() != certificate.public_key() {
        return Err(ConfigError::SigningKeyMismatch(certificate.subject().to_string()).into());
    }

    Ok(SigningIdentity::new(
        Identity::new(Arc::clone(context), certificate),
        key,
    ))
}
