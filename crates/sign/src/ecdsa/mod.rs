//! ECDSA engine, keys and signer

mod engine;
pub(crate) mod keys;
mod signature;
mod signer;

pub use engine::EcdsaEngine;
pub use keys::{EcPrivateKey, EcPublicKey};
pub use signature::EcdsaSignature;
pub use signer::{EcdsaSigner, NonceKind, SignerConfig};
