//! The 48-byte premaster secret

use rand::{CryptoRng, RngCore};
use sigil_api::{Result, SecretBytes};

use crate::version::ProtocolVersion;

/// Size of an RSA key exchange premaster secret
pub const PREMASTER_SECRET_LEN: usize = 48;

/// `client_version || random[46]`, zeroized on drop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremasterSecret(SecretBytes<PREMASTER_SECRET_LEN>);

impl PremasterSecret {
    /// Fresh secret for the client side of the exchange
    pub fn generate<R: RngCore + CryptoRng>(client_version: ProtocolVersion, rng: &mut R) -> Self {
        let mut bytes = SecretBytes::random(rng);
        bytes[..2].copy_from_slice(&client_version.to_bytes());
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        SecretBytes::from_slice(bytes).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Version in the first two bytes
    pub fn version(&self) -> ProtocolVersion {
        ProtocolVersion::new(self.0[0], self.0[1])
    }

    pub fn len(&self) -> usize {
        PREMASTER_SECRET_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<SecretBytes<PREMASTER_SECRET_LEN>> for PremasterSecret {
    fn from(bytes: SecretBytes<PREMASTER_SECRET_LEN>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for PremasterSecret {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
