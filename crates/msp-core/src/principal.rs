//! # Access-Control Principals
//!
//! A principal is a predicate an identity may or may not satisfy. The set
//! of classifications is closed: adding one forces every evaluator to
//! handle it at compile time.
//!
//! ## Wire Format
//!
//! ```text
//! u8 classification (0 = ROLE, 1 = ORGANIZATION_UNIT, 2 = IDENTITY)
//! u32 BE payload length | payload
//!   ROLE:               str role name | str organization id
//!   ORGANIZATION_UNIT:  str unit id   | str organization id | bytes certifiers id
//!   IDENTITY:           serialized identity envelope, verbatim
//! ```

use crate::certifiers::CertifiersId;
use crate::codec::{FieldReader, FieldWriter};
use crate::error::ParseError;
use crate::organization::OrganizationId;

/// The administrator role, the only role currently defined.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Principal classification tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalClassification {
    /// A named role within an organization.
    Role,
    /// Membership of an organizational unit bound to specific issuers.
    OrganizationUnit,
    /// One exact serialized identity.
    Identity,
}

impl PrincipalClassification {
    /// Wire tag for this classification.
    pub fn tag(self) -> u8 {
        match self {
            Self::Role => 0,
            Self::OrganizationUnit => 1,
            Self::Identity => 2,
        }
    }

    /// Classification for a wire tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Role),
            1 => Some(Self::OrganizationUnit),
            2 => Some(Self::Identity),
            _ => None,
        }
    }

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Role => "ROLE",
            Self::OrganizationUnit => "ORGANIZATION_UNIT",
            Self::Identity => "IDENTITY",
        }
    }
}

impl std::fmt::Display for PrincipalClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An abstract access-control principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Holder of `role` in `organization_id`.
    Role {
        /// Role name; only [`ADMIN_ROLE`] can be satisfied.
        role: String,
        /// Organization in which the role is held.
        organization_id: OrganizationId,
    },
    /// Member of organizational unit `unit_identifier` as certified by
    /// exactly the authorities digested into `certifiers_identifier`.
    OrganizationUnit {
        /// OU name.
        unit_identifier: String,
        /// Organization owning the OU.
        organization_id: OrganizationId,
        /// Certifiers digest the OU claim must be bound to.
        certifiers_identifier: CertifiersId,
    },
    /// The identity whose serialized envelope equals these bytes.
    ExactIdentity(Vec<u8>),
}

impl Principal {
    /// The administrator role of `organization_id`.
    pub fn admin(organization_id: OrganizationId) -> Self {
        Self::Role {
            role: ADMIN_ROLE.to_string(),
            organization_id,
        }
    }

    /// Classification tag of this principal.
    pub fn classification(&self) -> PrincipalClassification {
        match self {
            Self::Role { .. } => PrincipalClassification::Role,
            Self::OrganizationUnit { .. } => PrincipalClassification::OrganizationUnit,
            Self::ExactIdentity(_) => PrincipalClassification::Identity,
        }
    }

    /// Encode the principal with its classification tag.
    pub fn encode(&self) -> Vec<u8> {
        let payload = match self {
            Self::Role {
                role,
                organization_id,
            } => {
                let mut w = FieldWriter::new();
                w.put_str(role);
                w.put_str(organization_id.as_str());
                w.finish()
            }
            Self::OrganizationUnit {
                unit_identifier,
                organization_id,
                certifiers_identifier,
            } => {
                let mut w = FieldWriter::new();
                w.put_str(unit_identifier);
                w.put_str(organization_id.as_str());
                w.put_bytes(certifiers_identifier.as_bytes());
                w.finish()
            }
            Self::ExactIdentity(serialized) => serialized.clone(),
        };

        let mut w = FieldWriter::new();
        w.put_u8(self.classification().tag());
        w.put_bytes(&payload);
        w.finish()
    }

    /// Decode a principal.
    pub fn decode(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut outer = FieldReader::new(bytes);
        let tag = outer
            .u8("classification")
            .map_err(ParseError::MalformedPrincipal)?;
        let classification = PrincipalClassification::from_tag(tag).ok_or_else(|| {
            ParseError::MalformedPrincipal(format!("unknown classification {tag}"))
        })?;
        let payload = outer
            .bytes("payload")
            .map_err(ParseError::MalformedPrincipal)?;
        outer.finish().map_err(ParseError::MalformedPrincipal)?;

        match classification {
            PrincipalClassification::Role => {
                let mut r = FieldReader::new(payload);
                let role = r.str("role").map_err(ParseError::MalformedPrincipal)?;
                let org = read_org(&mut r)?;
                r.finish().map_err(ParseError::MalformedPrincipal)?;
                Ok(Self::Role {
                    role: role.to_string(),
                    organization_id: org,
                })
            }
            PrincipalClassification::OrganizationUnit => {
                let mut r = FieldReader::new(payload);
                let unit = r
                    .str("unit identifier")
                    .map_err(ParseError::MalformedPrincipal)?;
                let org = read_org(&mut r)?;
                let certifiers = r
                    .bytes("certifiers identifier")
                    .map_err(ParseError::MalformedPrincipal)?;
                r.finish().map_err(ParseError::MalformedPrincipal)?;
                Ok(Self::OrganizationUnit {
                    unit_identifier: unit.to_string(),
                    organization_id: org,
                    certifiers_identifier: CertifiersId::new(certifiers.to_vec()),
                })
            }
            PrincipalClassification::Identity => Ok(Self::ExactIdentity(payload.to_vec())),
        }
    }
}

fn read_org(r: &mut FieldReader<'_>) -> Result<OrganizationId, ParseError> {
    let org = r
        .str("organization id")
        .map_err(ParseError::MalformedPrincipal)?;
    OrganizationId::new(org)
        .map_err(|_| ParseError::MalformedPrincipal("organization id is empty".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn org(s: &str) -> OrganizationId {
        OrganizationId::new(s).unwrap()
    }

    #[test]
    fn role_principal_decodes_back() {
        let p = Principal::admin(org("DEFAULT"));
        let decoded = Principal::decode(&p.encode()).unwrap();
        assert_eq!(decoded, p);
        assert_eq!(decoded.classification(), PrincipalClassification::Role);
    }

    #[test]
    fn ou_principal_keeps_zero_length_digest() {
        let p = Principal::OrganizationUnit {
            unit_identifier: "COP".to_string(),
            organization_id: org("DEFAULT"),
            certifiers_identifier: CertifiersId::default(),
        };
        match Principal::decode(&p.encode()).unwrap() {
            Principal::OrganizationUnit {
                certifiers_identifier,
                ..
            } => assert!(certifiers_identifier.is_empty()),
            other => panic!("unexpected principal {other:?}"),
        }
    }

    #[test]
    fn identity_payload_is_carried_verbatim() {
        let envelope = vec![0, 0, 0, 1, b'X', 0, 0, 0, 1, 0x30];
        let encoded = Principal::ExactIdentity(envelope.clone()).encode();
        assert_eq!(encoded[0], 2);
        assert_eq!(&encoded[5..], envelope.as_slice());
    }

    #[test]
    fn unknown_classification_is_rejected() {
        let err = Principal::decode(&[7, 0, 0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedPrincipal("unknown classification 7".to_string())
        );
    }

    #[test]
    fn trailing_payload_bytes_are_rejected() {
        let mut w = FieldWriter::new();
        w.put_str("ADMIN");
        w.put_str("DEFAULT");
        w.put_u8(0);
        let payload = w.finish();
        let mut outer = FieldWriter::new();
        outer.put_u8(PrincipalClassification::Role.tag());
        outer.put_bytes(&payload);
        assert!(Principal::decode(&outer.finish()).is_err());
    }

    #[test]
    fn classification_names() {
        assert_eq!(PrincipalClassification::Role.to_string(), "ROLE");
        assert_eq!(
            PrincipalClassification::OrganizationUnit.to_string(),
            "ORGANIZATION_UNIT"
        );
        assert_eq!(PrincipalClassification::Identity.to_string(), "IDENTITY");
        for tag in 0..3 {
            let c = PrincipalClassification::from_tag(tag).unwrap();
            assert_eq!(c.tag(), tag);
        }
        assert!(PrincipalClassification::from_tag(3).is_none());
    }

    proptest! {
        #[test]
        fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..96)) {
            let _ = Principal::decode(&bytes);
        }
    }
}
