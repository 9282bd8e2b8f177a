//! Generic ECDSA sign and verify (FIPS 186-4 section 6)

use core::marker::PhantomData;

use elliptic_curve::group::{Curve as _, Group};
use elliptic_curve::ops::{Invert, LinearCombination, Reduce};
use elliptic_curve::point::AffineCoordinates;
use elliptic_curve::scalar::IsHigh;
use elliptic_curve::subtle::ConditionallySelectable;
use elliptic_curve::{Field, FieldBytes, NonZeroScalar, PrimeField, PublicKey, Scalar, SecretKey};
use sigil_internal::constant_time::ct_eq;
use tracing::trace;

use super::EcdsaSignature;
use crate::curve::{digest_to_scalar, nonzero_scalar_from_be, EcdsaCurve};
use crate::nonce::NonceCalculator;

/// ECDSA over the curve `C`
///
/// The engine holds no key and no nonce state. Each call receives its own
/// [`NonceCalculator`], so one engine can be shared across threads.
#[derive(Clone, Copy, Debug)]
pub struct EcdsaEngine<C> {
    normalize_s: bool,
    _curve: PhantomData<C>,
}

impl<C: EcdsaCurve> Default for EcdsaEngine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: EcdsaCurve> EcdsaEngine<C> {
    pub fn new() -> Self {
        Self {
            normalize_s: false,
            _curve: PhantomData,
        }
    }

    /// Replace `s` by `n - s` whenever `s > n/2`
    pub fn with_low_s(mut self, normalize: bool) -> Self {
        self.normalize_s = normalize;
        self
    }

    pub fn normalizes_s(&self) -> bool {
        self.normalize_s
    }

    /// Sign with a typed secret key
    pub fn sign<N>(&self, key: &SecretKey<C>, digest: &[u8], nonce: &mut N) -> EcdsaSignature
    where
        N: NonceCalculator<C> + ?Sized,
    {
        self.sign_prehashed(&key.to_nonzero_scalar(), digest, nonce)
    }

    /// Sign a message digest
    ///
    /// Algorithm:
    /// 1. `e` = leftmost `qlen` bits of the digest, reduced mod `n`
    /// 2. `k` from the nonce calculator
    /// 3. `r = x(k·G) mod n`; if `r = 0`, back to 2
    /// 4. `s = k⁻¹(e + r·d) mod n`; if `s = 0`, back to 2
    ///
    /// There is no retry limit. Both rejections occur with probability
    /// about `1/n` for an honest calculator.
    pub fn sign_prehashed<N>(
        &self,
        d: &NonZeroScalar<C>,
        digest: &[u8],
        nonce: &mut N,
    ) -> EcdsaSignature
    where
        N: NonceCalculator<C> + ?Sized,
    {
        let e = digest_to_scalar::<C>(digest);
        nonce.init(d, digest);

        loop {
            let k = nonce.next_k();

            let point = (C::ProjectivePoint::generator() * *k).to_affine();
            let r = reduce_x::<C>(&point.x());
            if bool::from(r.is_zero()) {
                trace!(curve = %C::CURVE, "r = 0, drawing another nonce");
                continue;
            }

            let k_inv = Invert::invert(&k);
            let mut s = *k_inv * (e + r * **d);
            if bool::from(s.is_zero()) {
                trace!(curve = %C::CURVE, "s = 0, drawing another nonce");
                continue;
            }

            if self.normalize_s {
                s = Scalar::<C>::conditional_select(&s, &-s, s.is_high());
            }

            return EcdsaSignature::new(&r.to_repr(), &s.to_repr());
        }
    }

    /// Verify a signature over a message digest
    ///
    /// Returns `false` for any `r` or `s` outside `[1, n-1]`, including
    /// over-long encodings, and never errors.
    pub fn verify_prehashed(&self, q: &PublicKey<C>, digest: &[u8], sig: &EcdsaSignature) -> bool {
        let (r, s) = match (
            nonzero_scalar_from_be::<C>(sig.r()),
            nonzero_scalar_from_be::<C>(sig.s()),
        ) {
            (Some(r), Some(s)) => (r, s),
            _ => return false,
        };

        let e = digest_to_scalar::<C>(digest);
        let c = *Invert::invert(&s);
        let u1 = e * c;
        let u2 = *r * c;

        let point = C::ProjectivePoint::lincomb(
            &C::ProjectivePoint::generator(),
            &u1,
            &q.to_projective(),
            &u2,
        );
        if bool::from(point.is_identity()) {
            return false;
        }

        let v = reduce_x::<C>(&point.to_affine().x());
        ct_eq(v.to_repr(), r.to_repr())
    }
}

fn reduce_x<C: EcdsaCurve>(x: &FieldBytes<C>) -> Scalar<C> {
    <Scalar<C> as Reduce<C::Uint>>::reduce_bytes(x)
}
