//! Constant-time operations to prevent timing attacks

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise. Slice lengths are
/// treated as public.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    ct_eq_choice(a, b).into()
}

/// Constant-time equality check that returns a Choice (0 or 1)
pub fn ct_eq_choice<A, B>(a: A, b: B) -> Choice
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return Choice::from(0);
    }

    a.ct_eq(b)
}

/// Constant-time equality of two lengths
pub fn ct_len_eq(a: usize, b: usize) -> Choice {
    (a as u64).ct_eq(&(b as u64))
}

/// Constant-time conditional assignment
///
/// Overwrites `dst` with `src` when `choice` is 1 and leaves it untouched
/// otherwise. Every byte of `dst` is written in both cases.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn ct_assign(dst: &mut [u8], src: &[u8], choice: Choice) {
    assert_eq!(dst.len(), src.len(), "ct_assign requires equal lengths");

    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(s, choice);
    }
}

/// Copy `src` into the fixed-size `dst`, zero-filling what `src` does not
/// cover and ignoring anything past `dst.len()`.
///
/// The length of `src` is treated as public. The loop always runs over the
/// full destination, and the source index and the byte kept are both picked
/// with constant-time selects, so no branch depends on `i < src.len()`.
pub fn ct_copy_padded(dst: &mut [u8], src: &[u8]) {
    let Some(last) = src.len().checked_sub(1) else {
        dst.fill(0);
        return;
    };

    for (i, d) in dst.iter_mut().enumerate() {
        let in_range = ct_lt(i, src.len());
        let idx = u64::conditional_select(&(last as u64), &(i as u64), in_range) as usize;
        *d = u8::conditional_select(&0, &src[idx], in_range);
    }
}

/// Constant-time `a < b` for lengths and indices
pub fn ct_lt(a: usize, b: usize) -> Choice {
    let a = a as u64;
    let b = b as u64;
    // Borrow out of the top bit of (a - b) when a < b.
    let diff = a.wrapping_sub(b);
    let borrow = ((!a & b) | (!(a ^ b) & diff)) >> 63;
    Choice::from(borrow as u8)
}
