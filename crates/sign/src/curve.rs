//! Curve binding for the generic ECDSA engine
//!
//! Point and scalar arithmetic come from the RustCrypto curve crates. This
//! module adds what the engine needs on top: the mapping between a curve type
//! and its [`NamedCurve`], SEC1 point codecs, access to the typed key behind
//! the runtime key wrappers, and the bit-string to integer conversions from
//! RFC 6979 section 2.3.

use elliptic_curve::generic_array::typenum::Unsigned;
use elliptic_curve::ops::Reduce;
use elliptic_curve::sec1::ToEncodedPoint;
use elliptic_curve::{
    CurveArithmetic, FieldBytes, FieldBytesEncoding, FieldBytesSize, NonZeroScalar, PrimeCurve,
    PublicKey, Scalar, SecretKey,
};
use sigil_api::NamedCurve;

use crate::ecdsa::keys::{PrivateKeyInner, PublicKeyInner};
use crate::ecdsa::{EcPrivateKey, EcPublicKey};

/// A prime-order curve the ECDSA engine can run on
pub trait EcdsaCurve: PrimeCurve + CurveArithmetic {
    /// Runtime identifier of this curve
    const CURVE: NamedCurve;

    /// Decode a SEC1 point, rejecting the identity and off-curve points
    fn decode_public(sec1: &[u8]) -> Option<PublicKey<Self>>;

    /// Encode a point in SEC1 form
    fn encode_public(key: &PublicKey<Self>, compress: bool) -> Vec<u8>;

    /// Typed secret key behind `key`, if it lives on this curve
    fn secret_key(key: &EcPrivateKey) -> Option<&SecretKey<Self>>;

    /// Typed public key behind `key`, if it lives on this curve
    fn public_key(key: &EcPublicKey) -> Option<&PublicKey<Self>>;

    /// Wrap a typed secret key
    fn wrap_secret(key: SecretKey<Self>) -> EcPrivateKey;

    /// Wrap a typed public key
    fn wrap_public(key: PublicKey<Self>) -> EcPublicKey;
}

macro_rules! impl_ecdsa_curve {
    ($curve:ty, $variant:ident) => {
        impl EcdsaCurve for $curve {
            const CURVE: NamedCurve = NamedCurve::$variant;

            fn decode_public(sec1: &[u8]) -> Option<PublicKey<Self>> {
                PublicKey::<Self>::from_sec1_bytes(sec1).ok()
            }

            fn encode_public(key: &PublicKey<Self>, compress: bool) -> Vec<u8> {
                key.to_encoded_point(compress).as_bytes().to_vec()
            }

            fn secret_key(key: &EcPrivateKey) -> Option<&SecretKey<Self>> {
                match &key.0 {
                    PrivateKeyInner::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn public_key(key: &EcPublicKey) -> Option<&PublicKey<Self>> {
                match &key.0 {
                    PublicKeyInner::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn wrap_secret(key: SecretKey<Self>) -> EcPrivateKey {
                EcPrivateKey(PrivateKeyInner::$variant(key))
            }

            fn wrap_public(key: PublicKey<Self>) -> EcPublicKey {
                EcPublicKey(PublicKeyInner::$variant(key))
            }
        }
    };
}

impl_ecdsa_curve!(p256::NistP256, P256);
impl_ecdsa_curve!(p384::NistP384, P384);
impl_ecdsa_curve!(k256::Secp256k1, Secp256k1);

/// Run `$body` with `$c` bound to the curve type selected by a [`NamedCurve`]
macro_rules! with_curve {
    ($named:expr, $c:ident => $body:expr) => {
        match $named {
            sigil_api::NamedCurve::P256 => {
                type $c = p256::NistP256;
                $body
            }
            sigil_api::NamedCurve::P384 => {
                type $c = p384::NistP384;
                $body
            }
            sigil_api::NamedCurve::Secp256k1 => {
                type $c = k256::Secp256k1;
                $body
            }
        }
    };
}

pub(crate) use with_curve;

/// Byte length of scalars and field elements on `C`
pub fn scalar_size<C: EcdsaCurve>() -> usize {
    <FieldBytesSize<C> as Unsigned>::USIZE
}

/// Group order `n` of `C`, big-endian
pub fn order<C: EcdsaCurve>() -> FieldBytes<C> {
    <C::Uint as FieldBytesEncoding<C>>::encode_field_bytes(&C::ORDER)
}

/// Group order of a named curve, big-endian
pub fn curve_order(curve: NamedCurve) -> Vec<u8> {
    with_curve!(curve, C => order::<C>().to_vec())
}

/// Bit length of the group order (`qlen` in RFC 6979)
pub fn order_bits<C: EcdsaCurve>() -> usize {
    let n = order::<C>();
    let mut bits = n.len() * 8;
    for &byte in n.iter() {
        if byte == 0 {
            bits -= 8;
        } else {
            bits -= byte.leading_zeros() as usize;
            break;
        }
    }
    bits
}

/// `bits2int` from RFC 6979 section 2.3.2, left-padded into a field-sized
/// buffer
///
/// The leftmost `qlen` bits of `input` are kept. The result is not reduced
/// and may be `>= n`.
pub(crate) fn bits_to_field<C: EcdsaCurve>(input: &[u8]) -> FieldBytes<C> {
    let size = scalar_size::<C>();
    let mut out = FieldBytes::<C>::default();

    if input.len() < size {
        out[size - input.len()..].copy_from_slice(input);
        return out;
    }

    out.copy_from_slice(&input[..size]);
    let shift = size * 8 - order_bits::<C>();
    if shift > 0 {
        shift_right(&mut out, shift);
    }
    out
}

/// Message representative `e'`: the digest truncated to `qlen` bits and
/// reduced into the scalar field
pub(crate) fn digest_to_scalar<C: EcdsaCurve>(digest: &[u8]) -> Scalar<C> {
    <Scalar<C> as Reduce<C::Uint>>::reduce_bytes(&bits_to_field::<C>(digest))
}

/// Parse a big-endian unsigned integer as a scalar in `[1, n-1]`
///
/// Leading zero bytes are ignored; anything else that does not fit returns
/// `None`.
pub(crate) fn nonzero_scalar_from_be<C: EcdsaCurve>(bytes: &[u8]) -> Option<NonZeroScalar<C>> {
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let trimmed = &bytes[skip..];
    let size = scalar_size::<C>();
    if trimmed.len() > size {
        return None;
    }

    let mut repr = FieldBytes::<C>::default();
    repr[size - trimmed.len()..].copy_from_slice(trimmed);
    NonZeroScalar::<C>::from_repr(repr).into()
}

/// Mask clearing the bits of the leading byte that lie above `qlen`
pub(crate) fn top_byte_mask<C: EcdsaCurve>() -> u8 {
    0xffu8 >> (scalar_size::<C>() * 8 - order_bits::<C>())
}

fn shift_right(bytes: &mut [u8], shift: usize) {
    debug_assert!(shift > 0 && shift < 8);
    let mut carry = 0u8;
    for byte in bytes.iter_mut() {
        let next = *byte << (8 - shift);
        *byte = (*byte >> shift) | carry;
        carry = next;
    }
}
