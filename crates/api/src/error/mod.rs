//! Error handling for the sigil crates

pub mod traits;
pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Re-export error traits
pub use traits::ResultExt;

impl From<sigil_internal::DerError> for Error {
    fn from(e: sigil_internal::DerError) -> Self {
        Self::Encoding {
            context: "DER",
            message: e.to_string(),
        }
    }
}
