//! Public API types for the sigil library
//!
//! This crate provides the error type shared by every sigil crate together
//! with the identifiers used to configure signers: curves, digests and
//! signature encodings.

pub mod error;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};
pub use types::*;
