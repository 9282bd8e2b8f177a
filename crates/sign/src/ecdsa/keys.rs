//! Runtime EC key types
//!
//! The generic engine works on `SecretKey<C>` / `PublicKey<C>`. Signers are
//! configured at runtime, so the keys they accept carry their curve as an
//! enum tag and are matched back onto the typed form through
//! [`EcdsaCurve`].

use core::fmt;

use elliptic_curve::{PublicKey, SecretKey};
use k256::Secp256k1;
use p256::NistP256;
use p384::NistP384;
use rand::{CryptoRng, RngCore};
use sigil_api::{Error, NamedCurve, Result};
use tracing::debug;
use zeroize::Zeroizing;

use crate::curve::{with_curve, EcdsaCurve};

#[derive(Clone)]
pub(crate) enum PrivateKeyInner {
    P256(SecretKey<NistP256>),
    P384(SecretKey<NistP384>),
    Secp256k1(SecretKey<Secp256k1>),
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) enum PublicKeyInner {
    P256(PublicKey<NistP256>),
    P384(PublicKey<NistP384>),
    Secp256k1(PublicKey<Secp256k1>),
}

/// EC private key: a scalar `d` in `[1, n-1]` tagged with its curve
///
/// The scalar is zeroized on drop and never shown by `Debug`.
#[derive(Clone)]
pub struct EcPrivateKey(pub(crate) PrivateKeyInner);

/// EC public key: a validated point `Q = d·G`, never the identity
#[derive(Clone, PartialEq, Eq)]
pub struct EcPublicKey(pub(crate) PublicKeyInner);

impl EcPrivateKey {
    /// Generate a fresh key pair on `curve`
    pub fn generate<R: RngCore + CryptoRng>(curve: NamedCurve, rng: &mut R) -> Self {
        with_curve!(curve, C => C::wrap_secret(SecretKey::<C>::random(rng)))
    }

    /// Import a big-endian scalar
    ///
    /// The input must be exactly `curve.scalar_size()` bytes and encode a
    /// value in `[1, n-1]`.
    pub fn from_bytes(curve: NamedCurve, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != curve.scalar_size() {
            return Err(Error::InvalidLength {
                context: "EC private key",
                expected: curve.scalar_size(),
                actual: bytes.len(),
            });
        }

        with_curve!(curve, C => {
            SecretKey::<C>::from_slice(bytes)
                .map(C::wrap_secret)
                .map_err(|_| {
                    debug!(curve = %curve, "rejected private scalar");
                    Error::invalid_key("EC private key", "scalar is zero or not below the group order")
                })
        })
    }

    pub fn curve(&self) -> NamedCurve {
        match &self.0 {
            PrivateKeyInner::P256(_) => NamedCurve::P256,
            PrivateKeyInner::P384(_) => NamedCurve::P384,
            PrivateKeyInner::Secp256k1(_) => NamedCurve::Secp256k1,
        }
    }

    /// Big-endian scalar, zeroized when the returned buffer drops
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        match &self.0 {
            PrivateKeyInner::P256(sk) => Zeroizing::new(sk.to_bytes().to_vec()),
            PrivateKeyInner::P384(sk) => Zeroizing::new(sk.to_bytes().to_vec()),
            PrivateKeyInner::Secp256k1(sk) => Zeroizing::new(sk.to_bytes().to_vec()),
        }
    }

    /// The matching public key `d·G`
    pub fn public_key(&self) -> EcPublicKey {
        match &self.0 {
            PrivateKeyInner::P256(sk) => NistP256::wrap_public(sk.public_key()),
            PrivateKeyInner::P384(sk) => NistP384::wrap_public(sk.public_key()),
            PrivateKeyInner::Secp256k1(sk) => Secp256k1::wrap_public(sk.public_key()),
        }
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcPrivateKey({})[REDACTED]", self.curve())
    }
}

impl EcPublicKey {
    /// Decode a SEC1 point, compressed (`02`/`03`) or uncompressed (`04`)
    ///
    /// Off-curve points and the point at infinity are rejected.
    pub fn from_sec1_bytes(curve: NamedCurve, bytes: &[u8]) -> Result<Self> {
        with_curve!(curve, C => {
            C::decode_public(bytes).map(C::wrap_public).ok_or_else(|| {
                debug!(curve = %curve, len = bytes.len(), "rejected public key encoding");
                Error::invalid_key("EC public key", "not a valid SEC1 point on the curve")
            })
        })
    }

    /// SEC1 encoding of the point
    pub fn to_sec1_bytes(&self, compress: bool) -> Vec<u8> {
        match &self.0 {
            PublicKeyInner::P256(pk) => NistP256::encode_public(pk, compress),
            PublicKeyInner::P384(pk) => NistP384::encode_public(pk, compress),
            PublicKeyInner::Secp256k1(pk) => Secp256k1::encode_public(pk, compress),
        }
    }

    pub fn curve(&self) -> NamedCurve {
        match &self.0 {
            PublicKeyInner::P256(_) => NamedCurve::P256,
            PublicKeyInner::P384(_) => NamedCurve::P384,
            PublicKeyInner::Secp256k1(_) => NamedCurve::Secp256k1,
        }
    }
}

impl fmt::Debug for EcPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPublicKey")
            .field("curve", &self.curve())
            .field("point", &hex::encode(self.to_sec1_bytes(true)))
            .finish()
    }
}
