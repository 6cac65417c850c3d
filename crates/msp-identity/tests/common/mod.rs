//! Shared fixtures: real certificate hierarchies generated with `rcgen`.

#![allow(dead_code)]

use msp_core::{OrganizationId, SerializedIdentity};
use msp_identity::{Msp, MspConfig, Ready, SigningIdentityInfo};

pub const ORG: &str = "DEFAULT";

pub fn org(id: &str) -> OrganizationId {
    OrganizationId::new(id).unwrap()
}

pub fn params(common_name: &str, units: &[&str], ca: bool) -> rcgen::CertificateParams {
    let mut params = rcgen::CertificateParams::new(Vec::<String>::new()).unwrap();
    let mut dn = rcgen::DistinguishedName::new();
    dn.push(rcgen::DnType::CommonName, common_name);
    for unit in units {
        dn.push(rcgen::DnType::OrganizationalUnitName, *unit);
    }
    params.distinguished_name = dn;
    if ca {
        params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Unconstrained);
    }
    params
}

/// A certificate authority: its certificate and signing key.
pub struct Authority {
    pub cert: rcgen::Certificate,
    pub key: rcgen::KeyPair,
}

/// An end-entity certificate with its PKCS#8 private key.
pub struct Issued {
    pub cert: Vec<u8>,
    pub pem: String,
    pub key: Vec<u8>,
}

impl Issued {
    /// The envelope an MSP for `org_id` would produce for this certificate.
    pub fn envelope(&self, org_id: &str) -> Vec<u8> {
        SerializedIdentity::new(org(org_id), self.cert.clone()).encode()
    }

    pub fn signing_info(&self) -> SigningIdentityInfo {
        SigningIdentityInfo::new(self.cert.clone(), self.key.clone())
    }
}

impl Authority {
    pub fn root(common_name: &str) -> Self {
        Self::root_with(common_name, rcgen::KeyPair::generate().unwrap())
    }

    pub fn root_ed25519(common_name: &str) -> Self {
        Self::root_with(
            common_name,
            rcgen::KeyPair::generate_for(&rcgen::PKCS_ED25519).unwrap(),
        )
    }

    fn root_with(common_name: &str, key: rcgen::KeyPair) -> Self {
        let cert = params(common_name, &[], true).self_signed(&key).unwrap();
        Self { cert, key }
    }

    pub fn intermediate(&self, common_name: &str) -> Self {
        let key = rcgen::KeyPair::generate().unwrap();
        let cert = params(common_name, &[], true)
            .signed_by(&key, &self.cert, &self.key)
            .unwrap();
        Self { cert, key }
    }

    pub fn leaf(&self, common_name: &str, units: &[&str]) -> Issued {
        let key = rcgen::KeyPair::generate_for(self.key.algorithm()).unwrap();
        let cert = params(common_name, units, false)
            .signed_by(&key, &self.cert, &self.key)
            .unwrap();
        Issued {
            cert: cert.der().to_vec(),
            pem: cert.pem(),
            key: key.serialize_der(),
        }
    }

    pub fn der(&self) -> Vec<u8> {
        self.cert.der().to_vec()
    }
}

/// Organization "DEFAULT": root → intermediate → {admin, signer, member}.
///
/// The signer and member claim OU "COP"; the admin claims no unit.
pub struct Fixture {
    pub root: Authority,
    pub ica: Authority,
    pub admin: Issued,
    pub signer: Issued,
    pub member: Issued,
}

impl Fixture {
    pub fn new() -> Self {
        let root = Authority::root("ca.default.example.com");
        let ica = root.intermediate("ica.default.example.com");
        let admin = ica.leaf("Admin@default.example.com", &[]);
        let signer = ica.leaf("peer0.default.example.com", &["COP"]);
        let member = ica.leaf("User1@default.example.com", &["COP"]);
        Self {
            root,
            ica,
            admin,
            signer,
            member,
        }
    }

    /// Roots, intermediates, one admin and the default signer.
    pub fn config(&self) -> MspConfig {
        MspConfig::new(org(ORG))
            .with_root_cert(self.root.der())
            .with_intermediate_cert(self.ica.der())
            .with_admin_cert(self.admin.cert.clone())
            .with_signing_identity(self.signer.signing_info())
    }

    pub fn msp(&self) -> Msp<Ready> {
        Msp::software().setup(self.config()).unwrap()
    }

    /// DER of every issuer of the leaves, in chain order.
    pub fn issuer_chain_der(&self) -> Vec<u8> {
        let mut der = self.ica.der();
        der.extend_from_slice(&self.root.der());
        der
    }
}
