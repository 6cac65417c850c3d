//! # Serialized Identity Envelope
//!
//! The wire form of an identity: the owning organization identifier and
//! the identity's certificate.
//!
//! ```text
//! u32 BE  organization id length | organization id (UTF-8, non-empty)
//! u32 BE  certificate length     | certificate (DER)
//! ```
//!
//! ## Security Invariant
//!
//! The layout is fixed and strict, so `decode(encode(x)) == x` and two
//! identities are equal exactly when their encodings are byte-identical.
//! Exact-identity principals and admin lists rely on this.

use crate::codec::{FieldReader, FieldWriter};
use crate::error::ParseError;
use crate::organization::OrganizationId;

/// A decoded identity envelope. The certificate is left unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedIdentity {
    /// Organization that owns the identity.
    pub organization_id: OrganizationId,
    /// Raw certificate bytes (canonically DER).
    pub certificate: Vec<u8>,
}

impl SerializedIdentity {
    /// Create an envelope from its parts.
    pub fn new(organization_id: OrganizationId, certificate: impl Into<Vec<u8>>) -> Self {
        Self {
            organization_id,
            certificate: certificate.into(),
        }
    }

    /// Encode the envelope.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = FieldWriter::new();
        w.put_str(self.organization_id.as_str());
        w.put_bytes(&self.certificate);
        w.finish()
    }

    /// Decode an envelope without parsing the certificate.
    pub fn decode(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut r = FieldReader::new(bytes);
        let organization_id = read_organization(&mut r)?;
        let certificate = r
            .bytes("certificate")
            .map_err(ParseError::MalformedEnvelope)?
            .to_vec();
        r.finish().map_err(ParseError::MalformedEnvelope)?;
        if certificate.is_empty() {
            return Err(ParseError::MalformedEnvelope(
                "certificate field is empty".to_string(),
            ));
        }
        Ok(Self {
            organization_id,
            certificate,
        })
    }

    /// Read only the organization identifier from an encoded envelope.
    ///
    /// Used for routing. The rest of the envelope is not inspected, so a
    /// successful peek does not imply the envelope is well formed.
    pub fn peek_organization(bytes: &[u8]) -> Result<OrganizationId, ParseError> {
        read_organization(&mut FieldReader::new(bytes))
    }
}

fn read_organization(r: &mut FieldReader<'_>) -> Result<OrganizationId, ParseError> {
    let org = r
        .str("organization id")
        .map_err(ParseError::MalformedEnvelope)?;
    OrganizationId::new(org)
        .map_err(|_| ParseError::MalformedEnvelope("organization id is empty".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn org(s: &str) -> OrganizationId {
        OrganizationId::new(s).unwrap()
    }

    #[test]
    fn encoding_layout_is_fixed() {
        let env = SerializedIdentity::new(org("AB"), vec![0x30, 0x01]);
        assert_eq!(
            env.encode(),
            vec![0, 0, 0, 2, b'A', b'B', 0, 0, 0, 2, 0x30, 0x01]
        );
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let mut bytes = SerializedIdentity::new(org("DEFAULT"), vec![1, 2, 3]).encode();
        bytes.push(0);
        assert!(matches!(
            SerializedIdentity::decode(&bytes),
            Err(ParseError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn decode_rejects_empty_organization_and_certificate() {
        let no_org = [0, 0, 0, 0, 0, 0, 0, 1, 0x30];
        assert!(SerializedIdentity::decode(&no_org).is_err());
        let no_cert = [0, 0, 0, 1, b'A', 0, 0, 0, 0];
        assert!(SerializedIdentity::decode(&no_cert).is_err());
    }

    #[test]
    fn peek_reads_only_the_organization() {
        let bytes = SerializedIdentity::new(org("Org1MSP"), vec![9; 10]).encode();
        assert_eq!(
            SerializedIdentity::peek_organization(&bytes).unwrap(),
            org("Org1MSP")
        );
        // A truncated certificate does not disturb routing.
        let truncated = &bytes[..bytes.len() - 3];
        assert!(SerializedIdentity::peek_organization(truncated).is_ok());
        assert!(SerializedIdentity::decode(truncated).is_err());
    }

    #[test]
    fn suffixing_the_organization_changes_the_peeked_value() {
        let env = SerializedIdentity::new(org("DEFAULT"), vec![1]);
        let mut altered = env.clone();
        altered.organization_id = org("DEFAULTBARF");
        let peeked = SerializedIdentity::peek_organization(&altered.encode()).unwrap();
        assert_eq!(peeked.as_str(), "DEFAULTBARF");
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(
            org_id in "[A-Za-z0-9.-]{1,40}",
            cert in proptest::collection::vec(any::<u8>(), 1..512),
        ) {
            let env = SerializedIdentity::new(OrganizationId::new(org_id).unwrap(), cert);
            let bytes = env.encode();
            let back = SerializedIdentity::decode(&bytes).unwrap();
            prop_assert_eq!(&back, &env);
            prop_assert_eq!(back.encode(), bytes);
        }

        #[test]
        fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = SerializedIdentity::decode(&bytes);
            let _ = SerializedIdentity::peek_organization(&bytes);
        }
    }
}
