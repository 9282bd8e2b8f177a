//! Key identifier calculation (RFC 5280 section 4.2.1.2)
//!
//! Method 1 is the full 160-bit SHA-1 of the `subjectPublicKey` BIT STRING
//! value, excluding tag, length and unused-bits octet. Method 2 keeps the
//! low 60 bits of that hash behind a fixed `0100` type nibble.

use core::fmt;

use sha1::{Digest, Sha1};
use sigil_api::Result;
use sigil_internal::der;
use sigil_sign::EcPublicKey;
use tracing::debug;

use crate::spki::SubjectPublicKeyInfo;

/// Length of a method 1 identifier
pub const FULL_IDENTIFIER_LEN: usize = 20;
/// Length of a method 2 identifier
pub const TRUNCATED_IDENTIFIER_LEN: usize = 8;

/// A computed key identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyIdentifier(Vec<u8>);

impl KeyIdentifier {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// DER value of a SubjectKeyIdentifier extension: `OCTET STRING`
    pub fn to_subject_key_identifier_der(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.0.len() + 2);
        der::write_tlv(der::TAG_OCTET_STRING, &self.0, &mut out);
        out
    }

    /// DER value of an AuthorityKeyIdentifier extension carrying only the
    /// `keyIdentifier [0]` field
    pub fn to_authority_key_identifier_der(&self) -> Vec<u8> {
        let mut field = Vec::with_capacity(self.0.len() + 2);
        der::write_tlv(der::TAG_CONTEXT_0, &self.0, &mut field);

        let mut out = Vec::with_capacity(field.len() + 2);
        der::write_tlv(der::TAG_SEQUENCE, &field, &mut out);
        out
    }
}

impl AsRef<[u8]> for KeyIdentifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for KeyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// Which RFC 5280 method to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyIdentifierMethod {
    /// 20-byte SHA-1 (method 1)
    #[default]
    Sha1Full,
    /// 8-byte truncated SHA-1 with type nibble (method 2)
    Sha1Truncated,
}

/// Stateless key identifier calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyIdentifierCalculator {
    method: KeyIdentifierMethod,
}

impl KeyIdentifierCalculator {
    pub fn new(method: KeyIdentifierMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> KeyIdentifierMethod {
        self.method
    }

    /// Identifier for a `subjectPublicKey` BIT STRING value
    pub fn compute(&self, public_key_bits: &[u8]) -> KeyIdentifier {
        match self.method {
            KeyIdentifierMethod::Sha1Full => Self::compute_full_identifier(public_key_bits),
            KeyIdentifierMethod::Sha1Truncated => {
                Self::compute_truncated_identifier(public_key_bits)
            }
        }
    }

    /// Method 1: SHA-1 of the bit string
    pub fn compute_full_identifier(public_key_bits: &[u8]) -> KeyIdentifier {
        KeyIdentifier(Sha1::digest(public_key_bits).to_vec())
    }

    /// Method 2: `0100` followed by the least significant 60 bits of the
    /// SHA-1 of the bit string
    pub fn compute_truncated_identifier(public_key_bits: &[u8]) -> KeyIdentifier {
        let hash = Sha1::digest(public_key_bits);
        let mut id = hash[FULL_IDENTIFIER_LEN - TRUNCATED_IDENTIFIER_LEN..].to_vec();
        id[0] = (id[0] & 0x0f) | 0x40;
        KeyIdentifier(id)
    }

    /// Identifier for a DER `SubjectPublicKeyInfo`
    pub fn from_spki_der(&self, spki: &[u8]) -> Result<KeyIdentifier> {
        let info = SubjectPublicKeyInfo::from_der(spki).map_err(|err| {
            debug!(error = %err, len = spki.len(), "could not parse SubjectPublicKeyInfo");
            err
        })?;
        Ok(self.compute(info.public_key))
    }

    /// Identifier for an EC key, hashing its uncompressed SEC1 point
    pub fn for_ec_public_key(&self, key: &EcPublicKey) -> KeyIdentifier {
        self.compute(&key.to_sec1_bytes(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spki::ec_public_key_to_der;
    use rand::rngs::OsRng;
    use sigil_api::NamedCurve;
    use sigil_sign::EcPrivateKey;

    #[test]
    fn test_full_identifier_is_sha1() {
        let id = KeyIdentifierCalculator::compute_full_identifier(b"abc");
        assert_eq!(id.len(), FULL_IDENTIFIER_LEN);
        assert_eq!(id.to_string(), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_truncated_identifier() {
        // Last 8 bytes of SHA-1("abc") are 7850c26c9cd0d89d.
        let id = KeyIdentifierCalculator::compute_truncated_identifier(b"abc");
        assert_eq!(id.len(), TRUNCATED_IDENTIFIER_LEN);
        assert_eq!(id.to_string(), "4850c26c9cd0d89d");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let id = KeyIdentifierCalculator::compute_truncated_identifier(b"abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(serde_json::from_str::<KeyIdentifier>(&json).unwrap(), id);

        let method = KeyIdentifierMethod::Sha1Truncated;
        let json = serde_json::to_string(&method).unwrap();
        assert_eq!(json, "\"Sha1Truncated\"");
        assert_eq!(serde_json::from_str::<KeyIdentifierMethod>(&json).unwrap(), method);
    }

    #[test]
    fn test_truncated_type_nibble() {
        for input in [&b""[..], &b"x"[..], &[0xFFu8; 65][..]] {
            let id = KeyIdentifierCalculator::compute_truncated_identifier(input);
            assert_eq!(id.as_bytes()[0] >> 4, 0x4);
            let full = KeyIdentifierCalculator::compute_full_identifier(input);
            assert_eq!(&id.as_bytes()[1..], &full.as_bytes()[13..]);
            assert_eq!(id.as_bytes()[0] & 0x0f, full.as_bytes()[12] & 0x0f);
        }
    }

    #[test]
    fn test_method_dispatch() {
        let full = KeyIdentifierCalculator::default();
        assert_eq!(full.method(), KeyIdentifierMethod::Sha1Full);
        assert_eq!(full.compute(b"abc").len(), 20);

        let short = KeyIdentifierCalculator::new(KeyIdentifierMethod::Sha1Truncated);
        assert_eq!(short.compute(b"abc").len(), 8);
    }

    #[test]
    fn test_spki_and_ec_key_agree() {
        let calc = KeyIdentifierCalculator::default();
        for curve in [NamedCurve::P256, NamedCurve::P384, NamedCurve::Secp256k1] {
            let key = EcPrivateKey::generate(curve, &mut OsRng).public_key();
            let from_der = calc.from_spki_der(&ec_public_key_to_der(&key)).unwrap();
            assert_eq!(from_der, calc.for_ec_public_key(&key));
        }
    }

    #[test]
    fn test_spki_errors_surface() {
        let calc = KeyIdentifierCalculator::default();
        assert!(calc.from_spki_der(&[0x30, 0x00]).is_err());
        assert!(calc.from_spki_der(&[]).is_err());
    }

    #[test]
    fn test_extension_encodings() {
        let id = KeyIdentifierCalculator::compute_truncated_identifier(b"abc");
        assert_eq!(
            hex::encode(id.to_subject_key_identifier_der()),
            "04084850c26c9cd0d89d"
        );
        assert_eq!(
            hex::encode(id.to_authority_key_identifier_der()),
            "300a80084850c26c9cd0d89d"
        );
    }
}
