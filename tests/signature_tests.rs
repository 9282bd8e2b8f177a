//! Integration tests for ECDSA signing through the facade

use sigil::prelude::*;
use rand::rngs::OsRng;

#[test]
fn test_default_signer_round_trip() {
    let mut rng = OsRng;

    // Generate keypair
    let secret_key = EcPrivateKey::generate(NamedCurve::P256, &mut rng);
    let public_key = secret_key.public_key();

    // Sign the message
    let signer = EcdsaSigner::default();
    let message = b"Test message for ECDSA signature";
    let signature = signer.sign(&secret_key, message).unwrap();

    // Verify the signature
    assert!(signer.verify(&public_key, message, &signature).unwrap());

    // Try with a modified message
    let modified_message = b"Modified message that should not verify";
    assert!(!signer.verify(&public_key, modified_message, &signature).unwrap());
}

#[test]
fn test_cross_encoding_verification() {
    let secret_key = EcPrivateKey::generate(NamedCurve::P384, &mut OsRng);
    let public_key = secret_key.public_key();
    let message = b"one signature, two encodings";

    let der_signer = EcdsaSigner::new(SignerConfig::new(NamedCurve::P384, DigestAlgorithm::Sha384));
    let plain_signer = EcdsaSigner::new(
        der_signer.config().with_encoding(SignatureEncoding::Plain),
    );

    let der = der_signer.sign(&secret_key, message).unwrap();
    let sig = EcdsaSignature::from_der(&der).unwrap();
    let plain = sig.to_plain(NamedCurve::P384.scalar_size()).unwrap();

    assert!(plain_signer.verify(&public_key, message, &plain).unwrap());
    // The DER bytes are not a valid plain signature
    assert!(!plain_signer.verify(&public_key, message, &der).unwrap());
}

#[test]
fn test_public_key_transport() {
    let secret_key = EcPrivateKey::generate(NamedCurve::Secp256k1, &mut OsRng);
    let signer = EcdsaSigner::new(
        SignerConfig::new(NamedCurve::Secp256k1, DigestAlgorithm::Sha256).with_low_s(true),
    );
    let signature = signer.sign(&secret_key, b"transported").unwrap();

    // The verifier only receives the compressed point
    let encoded = secret_key.public_key().to_sec1_bytes(true);
    let public_key = EcPublicKey::from_sec1_bytes(NamedCurve::Secp256k1, &encoded).unwrap();
    assert!(signer.verify(&public_key, b"transported", &signature).unwrap());
}

#[test]
fn test_private_key_import_export() {
    let secret_key = EcPrivateKey::generate(NamedCurve::P256, &mut OsRng);
    let bytes = secret_key.to_bytes();
    let imported = EcPrivateKey::from_bytes(NamedCurve::P256, &bytes).unwrap();
    assert_eq!(imported.public_key(), secret_key.public_key());

    // Deterministic signatures match across the round trip
    let signer = EcdsaSigner::default();
    assert_eq!(
        signer.sign(&secret_key, b"same").unwrap(),
        signer.sign(&imported, b"same").unwrap()
    );
}

#[test]
fn test_mismatched_curve_is_reported() {
    let secret_key = EcPrivateKey::generate(NamedCurve::Secp256k1, &mut OsRng);
    let signer = EcdsaSigner::default();
    assert!(matches!(
        signer.sign(&secret_key, b"msg"),
        Err(Error::InvalidKey { .. })
    ));
}
