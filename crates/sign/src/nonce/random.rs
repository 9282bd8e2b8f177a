use elliptic_curve::{FieldBytes, NonZeroScalar};
use rand::{CryptoRng, RngCore};
use tracing::trace;
use zeroize::Zeroize;

use super::NonceCalculator;
use crate::curve::{top_byte_mask, EcdsaCurve};

/// Nonces drawn uniformly from `[1, n-1]` by rejection sampling
///
/// Each candidate is `ceil(qlen / 8)` random bytes with the bits above
/// `qlen` cleared. Candidates equal to zero or `>= n` are discarded and
/// redrawn; they are never reduced modulo `n`, which would bias `k`.
pub struct RandomNonce<R> {
    rng: R,
}

impl<R: RngCore + CryptoRng> RandomNonce<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<C: EcdsaCurve, R: RngCore + CryptoRng> NonceCalculator<C> for RandomNonce<R> {
    fn is_deterministic(&self) -> bool {
        false
    }

    fn init(&mut self, _d: &NonZeroScalar<C>, _digest: &[u8]) {}

    fn next_k(&mut self) -> NonZeroScalar<C> {
        let mask = top_byte_mask::<C>();
        let mut bytes = FieldBytes::<C>::default();

        loop {
            self.rng.fill_bytes(&mut bytes);
            bytes[0] &= mask;

            let candidate: Option<NonZeroScalar<C>> =
                NonZeroScalar::<C>::from_repr(bytes.clone()).into();
            bytes[..].zeroize();

            if let Some(k) = candidate {
                return k;
            }
            trace!("random nonce out of range, redrawing");
        }
    }
}
