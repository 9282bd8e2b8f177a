//! EC-DSA signatures
//!
//! The crate is layered:
//!
//! - [`curve::EcdsaCurve`] binds a RustCrypto curve (P-256, P-384,
//!   secp256k1) to the engine.
//! - [`nonce`] produces the per-signature scalar `k`, either by rejection
//!   sampling from an RNG or deterministically per RFC 6979.
//! - [`ecdsa::EcdsaEngine`] is the generic sign/verify core.
//! - [`ecdsa::EcdsaSigner`] is the runtime entry point: a [`SignerConfig`]
//!   picks the curve, digest, wire encoding and nonce strategy, and the
//!   signer dispatches onto the generic engine.

pub mod curve;
pub mod digest;
pub mod ecdsa;
pub mod nonce;

pub use curve::{curve_order, EcdsaCurve};
pub use ecdsa::{
    EcPrivateKey, EcPublicKey, EcdsaEngine, EcdsaSignature, EcdsaSigner, NonceKind, SignerConfig,
};
pub use nonce::{DeterministicNonce, NonceCalculator, RandomNonce};

pub use sigil_api::{DigestAlgorithm, NamedCurve, SignatureEncoding};
