//! # MSP Directory Loader
//!
//! Reads an MSP from the conventional directory layout:
//!
//! ```text
//! <msp-dir>/
//!   cacerts/             root CA certificates, one per file
//!   intermediatecerts/   intermediate CA certificates
//!   admincerts/          administrator certificates
//!   signcerts/           default signer certificate (first file)
//!   keystore/            default signer PKCS#8 key (first file)
//!   config.yaml          optional OU restriction
//! ```
//!
//! Files are read in file-name order. Missing subdirectories are empty
//! sets; an MSP with neither roots nor intermediates is rejected.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use msp_core::{OrganizationId, OuIdentifier};
use msp_identity::{Msp, MspConfig, MspManager, Ready, SigningIdentityInfo};

/// Root CA certificates.
pub const CACERTS_DIR: &str = "cacerts";
/// Intermediate CA certificates.
pub const INTERMEDIATECERTS_DIR: &str = "intermediatecerts";
/// Administrator certificates.
pub const ADMINCERTS_DIR: &str = "admincerts";
/// Default signer certificate.
pub const SIGNCERTS_DIR: &str = "signcerts";
/// Default signer private key.
pub const KEYSTORE_DIR: &str = "keystore";
/// Optional OU restriction.
pub const CONFIG_FILE: &str = "config.yaml";

/// Contents of `config.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MspDirConfig {
    /// Accepted `(unit, certifiers)` pairs.
    #[serde(default)]
    pub organizational_unit_identifiers: Vec<OuIdentifier>,
}

/// An `ORG=DIR` pair naming an MSP and its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MspSpec {
    /// Organization identifier.
    pub organization_id: OrganizationId,
    /// MSP directory.
    pub dir: PathBuf,
}

impl FromStr for MspSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (org, dir) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ORG=DIR, got \"{s}\""))?;
        let organization_id = OrganizationId::new(org).map_err(|e| e.to_string())?;
        if dir.is_empty() {
            return Err(format!("MSP directory for \"{org}\" is empty"));
        }
        Ok(Self {
            organization_id,
            dir: PathBuf::from(dir),
        })
    }
}

/// Build an [`MspConfig`] for `organization_id` from `dir`.
pub fn load_msp_config(dir: &Path, organization_id: OrganizationId) -> Result<MspConfig> {
    if !dir.is_dir() {
        bail!("MSP directory not found: {}", dir.display());
    }

    let mut config = MspConfig::new(organization_id);
    config.root_certs = read_materials(&dir.join(CACERTS_DIR))?;
    config.intermediate_certs = read_materials(&dir.join(INTERMEDIATECERTS_DIR))?;
    if config.root_certs.is_empty() && config.intermediate_certs.is_empty() {
        bail!(
            "MSP directory {} has no certificates in {CACERTS_DIR}/ or {INTERMEDIATECERTS_DIR}/",
            dir.display()
        );
    }
    config.admin_certs = read_materials(&dir.join(ADMINCERTS_DIR))?;

    let sign_certs = read_materials(&dir.join(SIGNCERTS_DIR))?;
    let mut keys = read_materials(&dir.join(KEYSTORE_DIR))?;
    if let Some(certificate) = sign_certs.into_iter().next() {
        if keys.is_empty() {
            bail!(
                "{} has a signing certificate but {KEYSTORE_DIR}/ is empty",
                dir.display()
            );
        }
        let key = keys.swap_remove(0);
        config.signing_identity = Some(SigningIdentityInfo::new(certificate, key));
    }

    let config_path = dir.join(CONFIG_FILE);
    if config_path.is_file() {
        let text = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let parsed: MspDirConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        config.organizational_unit_identifiers = parsed.organizational_unit_identifiers;
    }

    tracing::debug!(
        dir = %dir.display(),
        organization = %config.organization_id,
        roots = config.root_certs.len(),
        intermediates = config.intermediate_certs.len(),
        admins = config.admin_certs.len(),
        signer = config.signing_identity.is_some(),
        "loaded MSP directory"
    );
    Ok(config)
}

/// Load and set up one MSP with the software provider.
pub fn load_msp(spec: &MspSpec) -> Result<Msp<Ready>> {
    let config = load_msp_config(&spec.dir, spec.organization_id.clone())?;
    Msp::software()
        .setup(config)
        .with_context(|| format!("failed to set up MSP \"{}\"", spec.organization_id))
}

/// Load every MSP in `specs` into a manager.
pub fn load_manager(specs: &[MspSpec]) -> Result<MspManager> {
    let msps = specs.iter().map(load_msp).collect::<Result<Vec<_>>>()?;
    MspManager::setup(msps).context("failed to register MSPs")
}

/// Contents of every regular file in `dir`, sorted by file name.
fn read_materials(dir: &Path) -> Result<Vec<Vec<u8>>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to list {}", dir.display()))?;
    paths.retain(|p| p.is_file());
    paths.sort();

    paths
        .iter()
        .map(|path| {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        })
        .collect()
}
