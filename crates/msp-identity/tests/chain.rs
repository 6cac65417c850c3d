//! Chain construction against adversarial and non-P-256 hierarchies.

mod common;

use common::{org, params, Authority, ORG};
use msp_core::{ChainError, SerializedIdentity};
use msp_crypto::{Certificate, CryptoProvider, SoftwareCryptoProvider};
use msp_identity::{certifiers_identifier, ChainBuilder, Msp, MspConfig};

fn parse(der: &[u8]) -> Certificate {
    SoftwareCryptoProvider::new().parse_certificate(der).unwrap()
}

#[test]
fn cross_signed_loop_is_detected() {
    // A and B certify each other; neither reaches the configured anchor.
    let key_a = rcgen::KeyPair::generate().unwrap();
    let key_b = rcgen::KeyPair::generate().unwrap();
    let a_self = params("A", &[], true).self_signed(&key_a).unwrap();
    let b = params("B", &[], true)
        .signed_by(&key_b, &a_self, &key_a)
        .unwrap();
    let a_by_b = params("A", &[], true)
        .signed_by(&key_a, &b, &key_b)
        .unwrap();

    let leaf_key = rcgen::KeyPair::generate().unwrap();
    let leaf = params("leaf", &[], false)
        .signed_by(&leaf_key, &a_by_b, &key_a)
        .unwrap();

    let provider = SoftwareCryptoProvider::new();
    let anchors = vec![parse(&Authority::root("unrelated").der())];
    let intermediates = vec![parse(a_by_b.der()), parse(b.der())];

    let err = ChainBuilder::new(&provider)
        .build(&parse(leaf.der()), &anchors, &intermediates)
        .unwrap_err();
    match err {
        ChainError::CycleDetected { subject } => assert!(subject.contains('A')),
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn ed25519_hierarchy_is_supported() {
    let root = Authority::root_ed25519("ca.ed.example.com");
    let member = root.leaf("User1@ed.example.com", &["COP"]);
    let signer = root.leaf("peer0.ed.example.com", &[]);

    let msp = Msp::software()
        .setup(
            MspConfig::new(org(ORG))
                .with_root_cert(root.der())
                .with_signing_identity(signer.signing_info()),
        )
        .unwrap();

    let identity = msp.deserialize_identity(&member.envelope(ORG)).unwrap();
    assert!(msp.validate(&identity).is_ok());

    // Chain of two: the certifiers identifier is the hash of the root alone.
    let units = identity.organizational_units().unwrap();
    assert_eq!(
        units[0].certifiers_identifier.as_bytes(),
        msp_crypto::sha256(&root.der()).as_slice()
    );

    let default = msp.default_signing_identity().unwrap();
    let signature = default.sign(b"ed25519 payload").unwrap();
    assert_eq!(signature.len(), 64);
    assert!(default
        .public_version()
        .verify(b"ed25519 payload", &signature)
        .is_ok());
}

#[test]
fn mixed_algorithm_chain_resolves() {
    // Ed25519 root signing a P-256 intermediate signing a P-256 leaf.
    let root = Authority::root_ed25519("ca.mixed.example.com");
    let ica = root.intermediate("ica.mixed.example.com");
    let leaf = ica.leaf("peer0.mixed.example.com", &[]);

    let provider = SoftwareCryptoProvider::new();
    let chain = ChainBuilder::new(&provider)
        .build(&parse(&leaf.cert), &[parse(&root.der())], &[parse(&ica.der())])
        .unwrap();
    assert_eq!(chain.len(), 3);

    let mut expected = ica.der();
    expected.extend_from_slice(&root.der());
    assert_eq!(
        certifiers_identifier(&provider, &chain).as_bytes(),
        msp_crypto::sha256(&expected).as_slice()
    );
}

#[test]
fn intermediate_only_configuration_anchors_at_the_intermediate() {
    let root = Authority::root("ca.example.com");
    let ica = root.intermediate("ica.example.com");
    let member = ica.leaf("User1@example.com", &["COP"]);

    let msp = Msp::software()
        .setup(MspConfig::new(org(ORG)).with_intermediate_cert(ica.der()))
        .unwrap();
    let identity = msp.deserialize_identity(&member.envelope(ORG)).unwrap();
    assert!(msp.validate(&identity).is_ok());

    // The chain stops at the intermediate, so only it is digested.
    assert_eq!(
        identity.organizational_units().unwrap()[0]
            .certifiers_identifier
            .as_bytes(),
        msp_crypto::sha256(&ica.der()).as_slice()
    );
}

#[test]
fn envelope_with_foreign_key_material_is_still_parsed() {
    // Deserialization does not imply trust: an unrelated certificate decodes
    // but fails validation.
    let msp = Msp::software()
        .setup(MspConfig::new(org(ORG)).with_root_cert(Authority::root("ca").der()))
        .unwrap();
    let stranger = Authority::root_ed25519("other").leaf("x", &[]);
    let envelope = SerializedIdentity::new(org(ORG), stranger.cert.clone()).encode();
    let identity = msp.deserialize_identity(&envelope).unwrap();
    assert!(msp.validate(&identity).is_err());
}
