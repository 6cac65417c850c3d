//! Certificate hierarchies for unit tests, generated with `rcgen`.

use msp_crypto::{Certificate, CryptoProvider, SoftwareCryptoProvider};

pub(crate) struct Authority {
    cert: rcgen::Certificate,
    key: rcgen::KeyPair,
}

fn params(common_name: &str, units: &[&str], ca: bool) -> rcgen::CertificateParams {
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

impl Authority {
    pub(crate) fn root(common_name: &str) -> Self {
        let key = rcgen::KeyPair::generate().unwrap();
        let cert = params(common_name, &[], true).self_signed(&key).unwrap();
        Self { cert, key }
    }

    pub(crate) fn intermediate(&self, common_name: &str) -> Self {
        let key = rcgen::KeyPair::generate().unwrap();
        let cert = params(common_name, &[], true)
            .signed_by(&key, &self.cert, &self.key)
            .unwrap();
        Self { cert, key }
    }

    /// Issue an end-entity certificate; returns `(certificate DER, PKCS#8 key DER)`.
    pub(crate) fn leaf(&self, common_name: &str, units: &[&str]) -> (Vec<u8>, Vec<u8>) {
        let key = rcgen::KeyPair::generate().unwrap();
        let cert = params(common_name, units, false)
            .signed_by(&key, &self.cert, &self.key)
            .unwrap();
        (cert.der().to_vec(), key.serialize_der())
    }

    pub(crate) fn der(&self) -> Vec<u8> {
        self.cert.der().to_vec()
    }
}

pub(crate) fn parse(der: &[u8]) -> Certificate {
    SoftwareCryptoProvider::new().parse_certificate(der).unwrap()
}
