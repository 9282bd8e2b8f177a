//! Message digests applied before signing

use sha2::Digest;
use sigil_api::DigestAlgorithm;

/// Hash `message` with `alg`
///
/// [`DigestAlgorithm::None`] passes the message through unchanged, so the
/// caller is expected to supply the digest itself.
pub fn hash(alg: DigestAlgorithm, message: &[u8]) -> Vec<u8> {
    match alg {
        DigestAlgorithm::None => message.to_vec(),
        DigestAlgorithm::Sha1 => sha1::Sha1::digest(message).to_vec(),
        DigestAlgorithm::Sha224 => sha2::Sha224::digest(message).to_vec(),
        DigestAlgorithm::Sha256 => sha2::Sha256::digest(message).to_vec(),
        DigestAlgorithm::Sha384 => sha2::Sha384::digest(message).to_vec(),
        DigestAlgorithm::Sha512 => sha2::Sha512::digest(message).to_vec(),
    }
}

/// Run `$body` with `$d` bound to the hash type behind a [`DigestAlgorithm`]
///
/// The HMAC-DRBG of a deterministic nonce needs a concrete hash even when
/// the message is signed raw; `None` maps to SHA-256 there.
macro_rules! with_digest {
    ($alg:expr, $d:ident => $body:expr) => {
        match $alg {
            sigil_api::DigestAlgorithm::Sha1 => {
                type $d = sha1::Sha1;
                $body
            }
            sigil_api::DigestAlgorithm::Sha224 => {
                type $d = sha2::Sha224;
                $body
            }
            sigil_api::DigestAlgorithm::None | sigil_api::DigestAlgorithm::Sha256 => {
                type $d = sha2::Sha256;
                $body
            }
            sigil_api::DigestAlgorithm::Sha384 => {
                type $d = sha2::Sha384;
                $body
            }
            sigil_api::DigestAlgorithm::Sha512 => {
                type $d = sha2::Sha512;
                $body
            }
        }
    };
}

pub(crate) use with_digest;
