//! `SubjectPublicKeyInfo` framing

use sigil_api::{Error, NamedCurve, Result, ResultExt};
use sigil_internal::der;
use sigil_sign::EcPublicKey;

/// id-ecPublicKey, 1.2.840.10045.2.1
pub const OID_EC_PUBLIC_KEY: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];

/// Borrowed view of a DER `SubjectPublicKeyInfo`
///
/// ```text
/// SubjectPublicKeyInfo ::= SEQUENCE {
///     algorithm         AlgorithmIdentifier,
///     subjectPublicKey  BIT STRING }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo<'a> {
    /// Contents of the `AlgorithmIdentifier` SEQUENCE
    pub algorithm: &'a [u8],
    /// Contents of the BIT STRING after the unused-bits octet
    pub public_key: &'a [u8],
}

impl<'a> SubjectPublicKeyInfo<'a> {
    pub fn from_der(input: &'a [u8]) -> Result<Self> {
        let body = der::expect_only(der::TAG_SEQUENCE, input).with_context("SubjectPublicKeyInfo")?;
        let (algorithm, rest) =
            der::expect_tlv(der::TAG_SEQUENCE, body).with_context("SPKI algorithm")?;
        let bits = der::expect_only(der::TAG_BIT_STRING, rest).with_context("SPKI public key")?;

        let (&unused, public_key) = bits.split_first().ok_or_else(|| Error::Encoding {
            context: "SPKI public key",
            message: "empty BIT STRING".into(),
        })?;
        if unused > 7 || (unused != 0 && public_key.is_empty()) {
            return Err(Error::Encoding {
                context: "SPKI public key",
                message: format!("invalid unused-bits count {}", unused),
            });
        }

        Ok(Self {
            algorithm,
            public_key,
        })
    }

    /// Object identifier of the key algorithm, content octets only
    pub fn algorithm_oid(&self) -> Result<&'a [u8]> {
        let (oid, _parameters) =
            der::expect_tlv(der::TAG_OID, self.algorithm).with_context("SPKI algorithm")?;
        Ok(oid)
    }
}

fn curve_oid(curve: NamedCurve) -> &'static [u8] {
    match curve {
        NamedCurve::P256 => &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07],
        NamedCurve::P384 => &[0x2b, 0x81, 0x04, 0x00, 0x22],
        NamedCurve::Secp256k1 => &[0x2b, 0x81, 0x04, 0x00, 0x0a],
    }
}

/// DER `SubjectPublicKeyInfo` for an EC key with named-curve parameters and
/// an uncompressed point
pub fn ec_public_key_to_der(key: &EcPublicKey) -> Vec<u8> {
    let mut algorithm = Vec::new();
    der::write_tlv(der::TAG_OID, OID_EC_PUBLIC_KEY, &mut algorithm);
    der::write_tlv(der::TAG_OID, curve_oid(key.curve()), &mut algorithm);

    let point = key.to_sec1_bytes(false);
    let mut bits = Vec::with_capacity(point.len() + 1);
    bits.push(0);
    bits.extend_from_slice(&point);

    let mut body = Vec::new();
    der::write_tlv(der::TAG_SEQUENCE, &algorithm, &mut body);
    der::write_tlv(der::TAG_BIT_STRING, &bits, &mut body);

    let mut out = Vec::new();
    der::write_tlv(der::TAG_SEQUENCE, &body, &mut out);
    out
}
