use core::marker::PhantomData;

use elliptic_curve::{NonZeroScalar, PrimeField};
use hmac::digest::core_api::{Block, BlockSizeUser};
use hmac::digest::{Digest, KeyInit};
use hmac::{Mac, SimpleHmac};
use tracing::trace;
use zeroize::{Zeroize, Zeroizing};

use super::NonceCalculator;
use crate::curve::{bits_to_field, digest_to_scalar, nonzero_scalar_from_be, scalar_size, EcdsaCurve};

/// RFC 6979 deterministic nonces (HMAC-DRBG over `D`)
///
/// The same private key and digest always produce the same sequence of
/// candidates. Additional input supplied through
/// [`with_extra_entropy`](Self::with_extra_entropy) is mixed into both
/// seeding rounds as described in RFC 6979 section 3.6, which hedges the
/// derivation against fault attacks without giving up determinism when the
/// extra input is fixed.
pub struct DeterministicNonce<C, D> {
    k: Zeroizing<Vec<u8>>,
    v: Zeroizing<Vec<u8>>,
    extra: Zeroizing<Vec<u8>>,
    ready: bool,
    issued: bool,
    _marker: PhantomData<(C, D)>,
}

impl<C, D> DeterministicNonce<C, D>
where
    C: EcdsaCurve,
    D: Digest + BlockSizeUser,
{
    pub fn new() -> Self {
        Self::with_extra_entropy(&[])
    }

    /// Calculator that appends `extra` to the seed material
    pub fn with_extra_entropy(extra: &[u8]) -> Self {
        Self {
            k: Zeroizing::new(Vec::new()),
            v: Zeroizing::new(Vec::new()),
            extra: Zeroizing::new(extra.to_vec()),
            ready: false,
            issued: false,
            _marker: PhantomData,
        }
    }

    /// `K = HMAC_K(V || sep || tail...)`, then `V = HMAC_K(V)`
    fn reseed(&mut self, sep: u8, tail: &[&[u8]]) {
        let mut parts: Vec<&[u8]> = Vec::with_capacity(tail.len() + 2);
        parts.push(self.v.as_slice());
        parts.push(core::slice::from_ref(&sep));
        parts.extend_from_slice(tail);

        let k = hmac_concat::<D>(&self.k, &parts);
        self.k = k;
        self.v = hmac_concat::<D>(&self.k, &[self.v.as_slice()]);
    }
}

impl<C, D> Default for DeterministicNonce<C, D>
where
    C: EcdsaCurve,
    D: Digest + BlockSizeUser,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, D> NonceCalculator<C> for DeterministicNonce<C, D>
where
    C: EcdsaCurve,
    D: Digest + BlockSizeUser,
{
    fn is_deterministic(&self) -> bool {
        true
    }

    fn init(&mut self, d: &NonZeroScalar<C>, digest: &[u8]) {
        let hlen = <D as Digest>::output_size();

        // int2octets(x) and bits2octets(h1)
        let mut x = d.to_repr();
        let h1 = digest_to_scalar::<C>(digest).to_repr();
        let extra = self.extra.clone();

        // ----- steps b, c -----
        self.v = Zeroizing::new(vec![0x01; hlen]);
        self.k = Zeroizing::new(vec![0x00; hlen]);

        // ----- steps d, e -----
        self.reseed(0x00, &[x.as_slice(), h1.as_slice(), extra.as_slice()]);

        // ----- steps f, g -----
        self.reseed(0x01, &[x.as_slice(), h1.as_slice(), extra.as_slice()]);

        x[..].zeroize();
        self.ready = true;
        self.issued = false;
    }

    fn next_k(&mut self) -> NonZeroScalar<C> {
        assert!(self.ready, "DeterministicNonce::next_k called before init");

        let size = scalar_size::<C>();

        // The previous candidate was turned down by the engine.
        if self.issued {
            self.reseed(0x00, &[]);
        }

        // ----- step h -----
        loop {
            let mut t = Zeroizing::new(Vec::with_capacity(size));
            while t.len() < size {
                self.v = hmac_concat::<D>(&self.k, &[self.v.as_slice()]);
                t.extend_from_slice(&self.v);
            }

            let mut candidate = bits_to_field::<C>(&t);
            let k = nonzero_scalar_from_be::<C>(&candidate);
            candidate[..].zeroize();

            if let Some(k) = k {
                self.issued = true;
                return k;
            }

            trace!("deterministic nonce candidate out of range, retrying");
            self.reseed(0x00, &[]);
        }
    }
}

fn hmac_concat<D>(key: &[u8], parts: &[&[u8]]) -> Zeroizing<Vec<u8>>
where
    D: Digest + BlockSizeUser,
{
    // HMAC zero-pads keys shorter than the block; K is never longer.
    let mut block = Block::<D>::default();
    block[..key.len()].copy_from_slice(key);

    let mut mac = <SimpleHmac<D> as KeyInit>::new(&block);
    block[..].zeroize();

    for part in parts {
        Mac::update(&mut mac, part);
    }
    Zeroizing::new(Mac::finalize(mac).into_bytes().to_vec())
}
