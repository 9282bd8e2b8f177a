//! Integration tests for key identifiers

use sigil::pki::spki::ec_public_key_to_der;
use sigil::prelude::*;
use rand::rngs::OsRng;

#[test]
fn test_identifiers_from_spki() {
    let public_key = EcPrivateKey::generate(NamedCurve::P256, &mut OsRng).public_key();
    let spki = ec_public_key_to_der(&public_key);

    let full = KeyIdentifierCalculator::new(KeyIdentifierMethod::Sha1Full)
        .from_spki_der(&spki)
        .unwrap();
    let truncated = KeyIdentifierCalculator::new(KeyIdentifierMethod::Sha1Truncated)
        .from_spki_der(&spki)
        .unwrap();

    assert_eq!(full.len(), 20);
    assert_eq!(truncated.len(), 8);
    assert_eq!(truncated.as_bytes()[0] & 0xf0, 0x40);
    assert_eq!(&truncated.as_bytes()[1..], &full.as_bytes()[13..]);
    assert_eq!(full.to_string().len(), 40);
}

#[test]
fn test_identifier_ignores_bit_string_framing() {
    let bits = [0x04u8, 0x01, 0x02, 0x03];
    // Declared length runs past the input
    let truncated = [
        0x30, 0x0c, 0x30, 0x03, 0x06, 0x01, 0x00, 0x03, 0x05, 0x00, 0x04, 0x01, 0x02,
    ];
    assert!(KeyIdentifierCalculator::default().from_spki_der(&truncated).is_err());

    let spki = [
        0x30, 0x0c, 0x30, 0x03, 0x06, 0x01, 0x00, 0x03, 0x05, 0x00, 0x04, 0x01, 0x02, 0x03,
    ];
    let from_der = KeyIdentifierCalculator::default().from_spki_der(&spki).unwrap();
    assert_eq!(from_der, KeyIdentifierCalculator::compute_full_identifier(&bits));
}
