//! # sigil
//!
//! The signature layer of a TLS/PKI provider.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sigil = "0.3"
//! ```
//!
//! ## Features
//!
//! - `sign` (default): EC-DSA over P-256, P-384 and secp256k1 with random or
//!   RFC 6979 nonces
//! - `pki` (default): X.509 subject/authority key identifiers
//! - `tls` (default): Bleichenbacher-hardened RSA premaster secret recovery
//! - `serde`: `Serialize`/`Deserialize` for identifiers and configurations
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`sigil-api`]: Errors and algorithm identifiers
//! - [`sigil-internal`]: Constant-time helpers and DER framing
//! - [`sigil-sign`]: ECDSA engine and signer
//! - [`sigil-pki`]: Key identifiers
//! - [`sigil-tls`]: Premaster secret handling

// Core re-exports (always available)
pub use sigil_api as api;
pub use sigil_internal as internal;

// Feature-gated re-exports
#[cfg(feature = "sign")]
pub use sigil_sign as sign;

#[cfg(feature = "pki")]
pub use sigil_pki as pki;

#[cfg(feature = "tls")]
pub use sigil_tls as tls;

/// Common imports for sigil users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result, ResultExt};

    // Re-export identifiers and secret containers
    pub use crate::api::{DigestAlgorithm, NamedCurve, SecretBytes, SignatureEncoding};

    #[cfg(feature = "sign")]
    pub use crate::sign::{
        EcPrivateKey, EcPublicKey, EcdsaSignature, EcdsaSigner, NonceKind, SignerConfig,
    };

    #[cfg(feature = "pki")]
    pub use crate::pki::{KeyIdentifier, KeyIdentifierCalculator, KeyIdentifierMethod};

    #[cfg(feature = "tls")]
    pub use crate::tls::{
        DecoderConfig, PremasterDecryptor, PremasterSecret, PremasterSecretDecoder,
        ProtocolVersion, VersionCheck,
    };
}
