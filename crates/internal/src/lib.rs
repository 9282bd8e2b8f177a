//! Internal utilities shared by the sigil crates
//!
//! Nothing in here is part of the stable public API. The helpers cover
//! constant-time byte handling and the small subset of DER needed to frame
//! signatures and walk a `SubjectPublicKeyInfo`.

pub mod constant_time;
pub mod der;

pub use constant_time::{ct_assign, ct_copy_padded, ct_eq, ct_eq_choice, ct_len_eq};
pub use der::DerError;
