//! Per-signature nonce generation
//!
//! Every ECDSA signature consumes one secret scalar `k` in `[1, n-1]`.
//! Reusing `k`, or letting its distribution skew, leaks the private key, so
//! the engine never builds `k` itself: it asks a [`NonceCalculator`].
//!
//! Two calculators are provided:
//!
//! - [`RandomNonce`] draws from a caller supplied CSPRNG and rejects values
//!   outside the range.
//! - [`DeterministicNonce`] derives `k` from the private key and the digest
//!   with HMAC-DRBG as described in RFC 6979 section 3.2.

mod deterministic;
mod random;

pub use deterministic::DeterministicNonce;
pub use random::RandomNonce;

use elliptic_curve::NonZeroScalar;

use crate::curve::EcdsaCurve;

/// Source of ECDSA nonces
///
/// A calculator is initialised once per signature with the private scalar
/// and the message digest, then asked for candidates until the engine finds
/// one that yields non-zero `r` and `s`.
pub trait NonceCalculator<C: EcdsaCurve> {
    /// Whether `k` is a function of `(d, digest)` alone
    fn is_deterministic(&self) -> bool;

    /// Prepare for a new signature
    ///
    /// Random calculators ignore both arguments.
    fn init(&mut self, d: &NonZeroScalar<C>, digest: &[u8]);

    /// Next candidate nonce, always in `[1, n-1]`
    ///
    /// # Panics
    ///
    /// Deterministic calculators panic when called before [`init`](Self::init).
    fn next_k(&mut self) -> NonZeroScalar<C>;
}
