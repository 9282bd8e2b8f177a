//! TLS RSA key exchange
//!
//! Recovery of the 48-byte premaster secret from a `ClientKeyExchange`
//! ciphertext without exposing a padding oracle (RFC 5246 section 7.4.7.1).
//! RSA decryption itself is supplied by the caller through
//! [`PremasterDecryptor`].

pub mod decoder;
pub mod premaster;
pub mod version;

pub use decoder::{DecoderConfig, PremasterDecryptor, PremasterSecretDecoder, VersionCheck};
pub use premaster::{PremasterSecret, PREMASTER_SECRET_LEN};
pub use version::ProtocolVersion;
