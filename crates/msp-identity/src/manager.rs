//! # MSP Manager
//!
//! A registry of ready MSPs keyed by organization identifier. The manager
//! reads only the organization field of an envelope to route it; the
//! owning MSP does the full decode.

use std::collections::BTreeMap;

use msp_core::{MspError, OrganizationId, RegistryError, SerializedIdentity};

use crate::identity::Identity;
use crate::msp::{Msp, Ready};

/// Routes identities to the MSP of their organization.
#[derive(Debug, Clone, Default)]
pub struct MspManager {
    msps: BTreeMap<OrganizationId, Msp<Ready>>,
}

impl MspManager {
    /// Register `msps`. Organization identifiers must be unique.
    pub fn setup(msps: impl IntoIterator<Item = Msp<Ready>>) -> Result<Self, MspError> {
        let mut registry = BTreeMap::new();
        for msp in msps {
            let organization_id = msp.organization_id().clone();
            if registry.contains_key(&organization_id) {
                return Err(RegistryError::DuplicateOrganization(organization_id.to_string()).into());
            }
            registry.insert(organization_id, msp);
        }
        tracing::info!(msps = registry.len(), "MSP manager set up");
        Ok(Self { msps: registry })
    }

    /// Decode `bytes` with the MSP named in its envelope.
    pub fn deserialize_identity(&self, bytes: &[u8]) -> Result<Identity, MspError> {
        let organization_id = SerializedIdentity::peek_organization(bytes)?;
        let msp = self.msps.get(&organization_id).ok_or_else(|| {
            tracing::debug!(organization = %organization_id, "no MSP for organization");
            RegistryError::UnknownOrganization(organization_id.to_string())
        })?;
        msp.deserialize_identity(bytes)
    }

    /// The MSP registered for `organization_id`.
    pub fn msp(&self, organization_id: &str) -> Option<&Msp<Ready>> {
        let key = OrganizationId::new(organization_id).ok()?;
        self.msps.get(&key)
    }

    /// Every registered MSP, ordered by organization identifier.
    pub fn msps(&self) -> impl Iterator<Item = &Msp<Ready>> {
        self.msps.values()
    }

    /// Number of registered MSPs.
    pub fn len(&self) -> usize {
        self.msps.len()
    }

    /// Whether no MSP is registered.
    pub fn is_empty(&self) -> bool {
        self.msps.is_empty()
    }
}
