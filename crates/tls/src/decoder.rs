//! Premaster secret recovery hardened against Bleichenbacher/Klima
//!
//! Whether RSA decryption succeeded, the plaintext had the right length or
//! carried the right version must not be observable. The decoder therefore
//! always draws a random fallback, always runs every check, and picks between
//! the decrypted candidate and the fallback with a constant-time select. No
//! error is returned and nothing about the outcome is logged.

use rand::{CryptoRng, RngCore};
use sigil_api::{Result, SecretBytes};
use sigil_internal::constant_time::{ct_assign, ct_copy_padded, ct_eq_choice, ct_len_eq};
use subtle::Choice;
use tracing::trace;
use zeroize::Zeroizing;

use crate::premaster::{PremasterSecret, PREMASTER_SECRET_LEN};
use crate::version::ProtocolVersion;

/// RSA PKCS#1 v1.5 decryption of a `ClientKeyExchange` ciphertext
///
/// Implementations return the unpadded plaintext or any error. The decoder
/// treats every error the same way, so implementations need not (and
/// should not) distinguish failure causes.
pub trait PremasterDecryptor {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

impl<F> PremasterDecryptor for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>>,
{
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self(ciphertext)
    }
}

/// Handling of the version embedded in the decrypted premaster secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VersionCheck {
    /// Ignore the embedded version and write the client version over it
    #[default]
    Overwrite,
    /// Select the fallback when the embedded version differs from the
    /// client version
    Strict,
    /// As `Strict`, except when the client offered TLS 1.0 or earlier;
    /// some old clients embed the negotiated version instead
    StrictExceptLegacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderConfig {
    pub version_check: VersionCheck,
}

impl DecoderConfig {
    pub fn with_version_check(mut self, version_check: VersionCheck) -> Self {
        self.version_check = version_check;
        self
    }
}

/// Server-side premaster secret decoder
pub struct PremasterSecretDecoder<D> {
    decryptor: D,
    config: DecoderConfig,
}

impl<D: PremasterDecryptor> PremasterSecretDecoder<D> {
    pub fn new(decryptor: D) -> Self {
        Self::with_config(decryptor, DecoderConfig::default())
    }

    pub fn with_config(decryptor: D, config: DecoderConfig) -> Self {
        Self { decryptor, config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Recover the premaster secret from `ciphertext`
    ///
    /// Always returns 48 bytes starting with `client_version`. When
    /// decryption fails, the plaintext is not 48 bytes long, or the version
    /// check rejects it, the remaining 46 bytes are random.
    pub fn decode<R: RngCore + CryptoRng>(
        &self,
        ciphertext: &[u8],
        client_version: ProtocolVersion,
        rng: &mut R,
    ) -> PremasterSecret {
        let version = client_version.to_bytes();

        // Fallback first, so the RNG is consumed the same way on every path.
        let mut secret = SecretBytes::<PREMASTER_SECRET_LEN>::random(rng);
        secret[..2].copy_from_slice(&version);

        let decrypted = Zeroizing::new(self.decryptor.decrypt(ciphertext).unwrap_or_default());
        let mut candidate = SecretBytes::<PREMASTER_SECRET_LEN>::zeroed();
        ct_copy_padded(candidate.as_mut(), &decrypted);

        let accept = ct_len_eq(decrypted.len(), PREMASTER_SECRET_LEN)
            & self.version_accepted(&candidate[..2], client_version);
        ct_assign(secret.as_mut(), candidate.as_ref(), accept);

        secret[..2].copy_from_slice(&version);

        trace!(
            version = %client_version,
            ciphertext_len = ciphertext.len(),
            "decoded premaster secret"
        );
        PremasterSecret::from(secret)
    }

    fn version_accepted(&self, embedded: &[u8], client_version: ProtocolVersion) -> Choice {
        let matches = ct_eq_choice(embedded, client_version.to_bytes());
        match self.config.version_check {
            VersionCheck::Overwrite => Choice::from(1),
            VersionCheck::Strict => matches,
            VersionCheck::StrictExceptLegacy => {
                let legacy = client_version.is_equal_or_earlier(ProtocolVersion::TLSV1_0);
                matches | Choice::from(legacy as u8)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use sigil_api::Error;
    use std::cell::Cell;

    fn plaintext(version: [u8; 2]) -> Vec<u8> {
        let mut pt: Vec<u8> = (0u8..48).collect();
        pt[..2].copy_from_slice(&version);
        pt
    }

    fn returning(pt: Vec<u8>) -> impl Fn(&[u8]) -> Result<Vec<u8>> {
        move |_| Ok(pt.clone())
    }

    fn failing(_: &[u8]) -> Result<Vec<u8>> {
        Err(Error::DecryptionFailed {
            context: "RSA PKCS#1 v1.5",
        })
    }

    /// What the decoder must return when it falls back, for a given seed
    fn expected_fallback(seed: u64, version: ProtocolVersion) -> Vec<u8> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut bytes = SecretBytes::<48>::random(&mut rng);
        bytes[..2].copy_from_slice(&version.to_bytes());
        bytes.as_ref().to_vec()
    }

    #[test]
    fn test_genuine_secret_is_returned() {
        let pt = plaintext([3, 3]);
        let decoder = PremasterSecretDecoder::new(returning(pt.clone()));
        let secret = decoder.decode(b"ciphertext", ProtocolVersion::TLSV1_2, &mut OsRng);
        assert_eq!(secret.as_bytes(), &pt[..]);
        assert_eq!(secret.version(), ProtocolVersion::TLSV1_2);
    }

    #[test]
    fn test_embedded_version_is_overwritten_by_default() {
        let decoder = PremasterSecretDecoder::new(returning(plaintext([3, 1])));
        let secret = decoder.decode(b"ct", ProtocolVersion::TLSV1_2, &mut OsRng);
        assert_eq!(&secret.as_bytes()[..2], &[3, 3]);
        assert_eq!(&secret.as_bytes()[2..], &plaintext([3, 1])[2..]);
    }

    #[test]
    fn test_decryption_failure_yields_fallback() {
        let decoder = PremasterSecretDecoder::new(failing);
        let secret = decoder.decode(
            b"ct",
            ProtocolVersion::TLSV1_2,
            &mut ChaCha20Rng::seed_from_u64(1),
        );
        assert_eq!(secret.len(), PREMASTER_SECRET_LEN);
        assert_eq!(
            secret.as_bytes(),
            &expected_fallback(1, ProtocolVersion::TLSV1_2)[..]
        );
    }

    #[test]
    fn test_fallback_tails_differ() {
        let decoder = PremasterSecretDecoder::new(failing);
        let a = decoder.decode(b"ct", ProtocolVersion::TLSV1_1, &mut OsRng);
        let b = decoder.decode(b"ct", ProtocolVersion::TLSV1_1, &mut OsRng);
        assert_eq!(&a.as_bytes()[..2], &[3, 2]);
        assert_eq!(&b.as_bytes()[..2], &[3, 2]);
        assert_ne!(&a.as_bytes()[2..], &b.as_bytes()[2..]);
    }

    #[test]
    fn test_wrong_lengths_yield_fallback() {
        for len in [0usize, 2, 46, 47, 49, 256] {
            let mut pt = vec![0x5Au8; len];
            if len >= 2 {
                pt[..2].copy_from_slice(&[3, 3]);
            }
            let decoder = PremasterSecretDecoder::new(returning(pt));
            let secret = decoder.decode(
                b"ct",
                ProtocolVersion::TLSV1_2,
                &mut ChaCha20Rng::seed_from_u64(len as u64),
            );
            assert_eq!(
                secret.as_bytes(),
                &expected_fallback(len as u64, ProtocolVersion::TLSV1_2)[..],
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_rng_use_does_not_depend_on_outcome() {
        let good = PremasterSecretDecoder::new(returning(plaintext([3, 3])));
        let bad = PremasterSecretDecoder::new(failing);

        let mut rng_a = ChaCha20Rng::seed_from_u64(9);
        let mut rng_b = ChaCha20Rng::seed_from_u64(9);
        let _ = good.decode(b"ct", ProtocolVersion::TLSV1_2, &mut rng_a);
        let _ = bad.decode(b"ct", ProtocolVersion::TLSV1_2, &mut rng_b);
        assert_eq!(rng_a.next_u64(), rng_b.next_u64());
    }

    #[test]
    fn test_strict_version_check() {
        let config = DecoderConfig::default().with_version_check(VersionCheck::Strict);

        let mismatched = PremasterSecretDecoder::with_config(returning(plaintext([3, 1])), config);
        let secret = mismatched.decode(
            b"ct",
            ProtocolVersion::TLSV1_2,
            &mut ChaCha20Rng::seed_from_u64(3),
        );
        assert_eq!(
            secret.as_bytes(),
            &expected_fallback(3, ProtocolVersion::TLSV1_2)[..]
        );

        let matching = PremasterSecretDecoder::with_config(returning(plaintext([3, 3])), config);
        let secret = matching.decode(b"ct", ProtocolVersion::TLSV1_2, &mut OsRng);
        assert_eq!(secret.as_bytes(), &plaintext([3, 3])[..]);
    }

    #[test]
    fn test_legacy_clients_are_tolerated() {
        let config = DecoderConfig::default().with_version_check(VersionCheck::StrictExceptLegacy);

        // A TLS 1.0 client that embedded SSLv3
        let legacy = PremasterSecretDecoder::with_config(returning(plaintext([3, 0])), config);
        let secret = legacy.decode(b"ct", ProtocolVersion::TLSV1_0, &mut OsRng);
        assert_eq!(&secret.as_bytes()[..2], &[3, 1]);
        assert_eq!(&secret.as_bytes()[2..], &plaintext([3, 0])[2..]);

        // A TLS 1.2 client gets no such leniency
        let modern = PremasterSecretDecoder::with_config(returning(plaintext([3, 1])), config);
        let secret = modern.decode(
            b"ct",
            ProtocolVersion::TLSV1_2,
            &mut ChaCha20Rng::seed_from_u64(5),
        );
        assert_eq!(
            secret.as_bytes(),
            &expected_fallback(5, ProtocolVersion::TLSV1_2)[..]
        );
    }

    #[test]
    fn test_decryptor_sees_ciphertext_once() {
        let calls = Cell::new(0);
        let decryptor = |ct: &[u8]| -> Result<Vec<u8>> {
            calls.set(calls.get() + 1);
            assert_eq!(ct, b"opaque");
            Ok(plaintext([3, 3]))
        };
        let decoder = PremasterSecretDecoder::new(decryptor);
        let _ = decoder.decode(b"opaque", ProtocolVersion::TLSV1_2, &mut OsRng);
        assert_eq!(calls.get(), 1);
    }

    struct FixedKey(Vec<u8>);

    impl PremasterDecryptor for FixedKey {
        fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
            if ciphertext.len() == self.0.len() {
                Ok(ciphertext.iter().zip(&self.0).map(|(c, k)| c ^ k).collect())
            } else {
                Err(Error::DecryptionFailed { context: "xor" })
            }
        }
    }

    #[test]
    fn test_trait_implementations() {
        let key = vec![0x33u8; 48];
        let pt = plaintext([3, 3]);
        let ct: Vec<u8> = pt.iter().zip(&key).map(|(p, k)| p ^ k).collect();

        let decoder = PremasterSecretDecoder::new(FixedKey(key));
        assert_eq!(
            decoder.decode(&ct, ProtocolVersion::TLSV1_2, &mut OsRng).as_bytes(),
            &pt[..]
        );
        assert_eq!(decoder.config().version_check, VersionCheck::Overwrite);
    }
}
