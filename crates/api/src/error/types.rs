//! Error type definitions for cryptographic operations

use thiserror::Error as ThisError;

/// Primary error type for sigil operations
///
/// Verification of a well-formed but wrong signature is *not* an error: the
/// verifiers return `Ok(false)`. Errors are reserved for contract violations
/// such as feeding a key from one curve to a signer configured for another.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Invalid key material: wrong curve, scalar out of range, bad point
    #[error("Invalid key: {context}: {message}")]
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// Decryption failed
    #[error("Decryption failed: {context}")]
    DecryptionFailed { context: &'static str },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Malformed encoding (DER, SEC1, ...)
    #[error("Encoding error: {context}: {message}")]
    Encoding {
        context: &'static str,
        message: String,
    },
}

/// Result type for sigil operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::InvalidKey`]
    pub fn invalid_key(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::InvalidParameter`]
    pub fn invalid_parameter(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            context,
            message: message.into(),
        }
    }

    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidKey { message, .. } => Self::InvalidKey { context, message },
            Self::DecryptionFailed { .. } => Self::DecryptionFailed { context },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::Encoding { message, .. } => Self::Encoding { context, message },
        }
    }

    /// Replace the message of an existing error, where it carries one
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::InvalidKey { context, .. } => Self::InvalidKey { context, message },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::Encoding { context, .. } => Self::Encoding { context, message },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::invalid_key("ECDSA sign", "key is for P-384");
        assert_eq!(err.to_string(), "Invalid key: ECDSA sign: key is for P-384");

        let err = Error::InvalidLength {
            context: "premaster",
            expected: 48,
            actual: 47,
        };
        assert_eq!(
            err.to_string(),
            "premaster: invalid length (expected 48, got 47)"
        );
    }

    #[test]
    fn test_with_context_keeps_message() {
        let err = Error::invalid_parameter("a", "boom").with_context("b");
        assert_eq!(
            err,
            Error::InvalidParameter {
                context: "b",
                message: "boom".into()
            }
        );
    }

    #[test]
    fn test_with_message_ignores_messageless_variants() {
        let err = Error::DecryptionFailed { context: "rsa" }.with_message("ignored");
        assert_eq!(err, Error::DecryptionFailed { context: "rsa" });
    }
}
