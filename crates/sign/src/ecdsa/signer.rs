//! Runtime-configured ECDSA signer

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use sigil_api::{DigestAlgorithm, Error, NamedCurve, Result, SignatureEncoding};
use tracing::debug;
use zeroize::Zeroizing;

use super::{EcPrivateKey, EcPublicKey, EcdsaEngine, EcdsaSignature};
use crate::curve::{with_curve, EcdsaCurve};
use crate::digest::{hash, with_digest};
use crate::nonce::{DeterministicNonce, RandomNonce};

/// How the signer obtains its per-signature nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NonceKind {
    /// Rejection sampling from the RNG
    Random,
    /// RFC 6979 with the configured digest
    #[default]
    Deterministic,
    /// RFC 6979 with 32 bytes of RNG output as additional input
    Hedged,
}

/// Signer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignerConfig {
    pub curve: NamedCurve,
    pub digest: DigestAlgorithm,
    pub encoding: SignatureEncoding,
    pub nonce: NonceKind,
    /// Emit only `s <= n/2`
    pub normalize_s: bool,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self::new(NamedCurve::P256, DigestAlgorithm::Sha256)
    }
}

impl SignerConfig {
    pub fn new(curve: NamedCurve, digest: DigestAlgorithm) -> Self {
        Self {
            curve,
            digest,
            encoding: SignatureEncoding::Der,
            nonce: NonceKind::Deterministic,
            normalize_s: false,
        }
    }

    pub fn with_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_nonce(mut self, nonce: NonceKind) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn with_low_s(mut self, normalize_s: bool) -> Self {
        self.normalize_s = normalize_s;
        self
    }

    /// Conventional algorithm name, e.g. `SHA256withECDSA` or
    /// `SHA384withPLAIN-ECDSA`
    pub fn algorithm_name(&self) -> String {
        match self.encoding {
            SignatureEncoding::Der => format!("{}withECDSA", self.digest),
            SignatureEncoding::Plain => format!("{}withPLAIN-ECDSA", self.digest),
        }
    }
}

/// ECDSA signer for one curve / digest / encoding combination
///
/// Keys are checked against the configured curve on every call. A key from
/// another curve is a caller error and yields [`Error::InvalidKey`]; a
/// signature that merely fails to verify yields `Ok(false)`.
#[derive(Debug, Clone)]
pub struct EcdsaSigner {
    config: SignerConfig,
}

impl Default for EcdsaSigner {
    fn default() -> Self {
        Self::new(SignerConfig::default())
    }
}

impl EcdsaSigner {
    pub fn new(config: SignerConfig) -> Self {
        debug!(
            curve = %config.curve,
            digest = %config.digest,
            encoding = ?config.encoding,
            nonce = ?config.nonce,
            normalize_s = config.normalize_s,
            "configured ECDSA signer"
        );
        Self { config }
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Hash and sign `message`, drawing randomness from the OS
    pub fn sign(&self, key: &EcPrivateKey, message: &[u8]) -> Result<Vec<u8>> {
        self.sign_with_rng(key, message, &mut OsRng)
    }

    /// Hash and sign `message`, returning the encoded signature
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        key: &EcPrivateKey,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let digest = hash(self.config.digest, message);
        self.sign_digest_with_rng(key, &digest, rng)?
            .encode(self.config.encoding, self.config.curve)
    }

    /// Sign an already computed digest
    pub fn sign_digest(&self, key: &EcPrivateKey, digest: &[u8]) -> Result<EcdsaSignature> {
        self.sign_digest_with_rng(key, digest, &mut OsRng)
    }

    pub fn sign_digest_with_rng<R: RngCore + CryptoRng>(
        &self,
        key: &EcPrivateKey,
        digest: &[u8],
        rng: &mut R,
    ) -> Result<EcdsaSignature> {
        with_curve!(self.config.curve, C => self.sign_on::<C, R>(key, digest, rng))
    }

    /// Hash `message` and check an encoded signature over it
    ///
    /// Signatures that do not decode in the configured encoding verify as
    /// `false`.
    pub fn verify(&self, key: &EcPublicKey, message: &[u8], signature: &[u8]) -> Result<bool> {
        let sig = match EcdsaSignature::decode(signature, self.config.encoding, self.config.curve) {
            Ok(sig) => sig,
            Err(err) => {
                debug!(error = %err, "signature did not decode");
                return Ok(false);
            }
        };

        let digest = hash(self.config.digest, message);
        self.verify_digest(key, &digest, &sig)
    }

    /// Check a decoded signature over a digest
    pub fn verify_digest(
        &self,
        key: &EcPublicKey,
        digest: &[u8],
        signature: &EcdsaSignature,
    ) -> Result<bool> {
        with_curve!(self.config.curve, C => {
            let q = C::public_key(key).ok_or_else(|| self.curve_mismatch(key.curve()))?;
            Ok(self.engine::<C>().verify_prehashed(q, digest, signature))
        })
    }

    fn sign_on<C: EcdsaCurve, R: RngCore + CryptoRng>(
        &self,
        key: &EcPrivateKey,
        digest: &[u8],
        rng: &mut R,
    ) -> Result<EcdsaSignature> {
        let secret = C::secret_key(key).ok_or_else(|| self.curve_mismatch(key.curve()))?;
        let d = secret.to_nonzero_scalar();
        let engine = self.engine::<C>();

        let signature = match self.config.nonce {
            NonceKind::Random => engine.sign_prehashed(&d, digest, &mut RandomNonce::new(rng)),
            NonceKind::Deterministic => with_digest!(self.config.digest, D => {
                engine.sign_prehashed(&d, digest, &mut DeterministicNonce::<C, D>::new())
            }),
            NonceKind::Hedged => {
                let mut extra = Zeroizing::new([0u8; 32]);
                rng.fill_bytes(&mut extra[..]);
                with_digest!(self.config.digest, D => {
                    let mut nonce = DeterministicNonce::<C, D>::with_extra_entropy(&extra[..]);
                    engine.sign_prehashed(&d, digest, &mut nonce)
                })
            }
        };
        Ok(signature)
    }

    fn engine<C: EcdsaCurve>(&self) -> EcdsaEngine<C> {
        EcdsaEngine::new().with_low_s(self.config.normalize_s)
    }

    fn curve_mismatch(&self, key_curve: NamedCurve) -> Error {
        Error::invalid_key(
            "ECDSA",
            format!(
                "key is for {}, signer is configured for {}",
                key_curve, self.config.curve
            ),
        )
    }
}
