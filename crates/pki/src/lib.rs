//! X.509 key identifiers
//!
//! Subject and authority key identifiers (RFC 5280 section 4.2.1.2) derived
//! from the `subjectPublicKey` BIT STRING of a certificate's
//! `SubjectPublicKeyInfo`.

pub mod key_identifier;
pub mod spki;

pub use key_identifier::{KeyIdentifier, KeyIdentifierCalculator, KeyIdentifierMethod};
pub use spki::SubjectPublicKeyInfo;
