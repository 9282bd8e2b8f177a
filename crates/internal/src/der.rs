//! Minimal DER framing
//!
//! Only definite-length, single-byte-tag TLVs are handled. That is enough for
//! `SEQUENCE { INTEGER r, INTEGER s }` signatures, for pulling the BIT
//! STRING out of a `SubjectPublicKeyInfo` and for the key identifier
//! extension values.

use thiserror::Error;

pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_BIT_STRING: u8 = 0x03;
pub const TAG_OCTET_STRING: u8 = 0x04;
pub const TAG_OID: u8 = 0x06;
pub const TAG_SEQUENCE: u8 = 0x30;
/// `[0] IMPLICIT`, primitive
pub const TAG_CONTEXT_0: u8 = 0x80;

/// Errors produced while reading DER
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DerError {
    #[error("input truncated")]
    Truncated,

    #[error("unexpected tag: expected 0x{expected:02x}, found 0x{found:02x}")]
    UnexpectedTag { expected: u8, found: u8 },

    #[error("indefinite or over-long length")]
    UnsupportedLength,

    #[error("non-minimal encoding")]
    NonCanonical,

    #[error("negative integer")]
    Negative,

    #[error("trailing data after value")]
    TrailingData,
}

/// Read one TLV, returning `(tag, contents, rest)`
pub fn read_tlv(input: &[u8]) -> Result<(u8, &[u8], &[u8]), DerError> {
    let (&tag, after_tag) = input.split_first().ok_or(DerError::Truncated)?;
    let (&first, mut rest) = after_tag.split_first().ok_or(DerError::Truncated)?;

    let len = if first < 0x80 {
        first as usize
    } else {
        let count = (first & 0x7f) as usize;
        if count == 0 || count > 4 {
            return Err(DerError::UnsupportedLength);
        }
        if rest.len() < count {
            return Err(DerError::Truncated);
        }
        let (len_bytes, after_len) = rest.split_at(count);
        if len_bytes[0] == 0 {
            return Err(DerError::NonCanonical);
        }
        let len = len_bytes
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize);
        if len < 0x80 {
            return Err(DerError::NonCanonical);
        }
        rest = after_len;
        len
    };

    if rest.len() < len {
        return Err(DerError::Truncated);
    }
    let (contents, rest) = rest.split_at(len);
    Ok((tag, contents, rest))
}

/// Read one TLV that must carry `tag`, returning `(contents, rest)`
pub fn expect_tlv(tag: u8, input: &[u8]) -> Result<(&[u8], &[u8]), DerError> {
    let (found, contents, rest) = read_tlv(input)?;
    if found != tag {
        return Err(DerError::UnexpectedTag {
            expected: tag,
            found,
        });
    }
    Ok((contents, rest))
}

/// Read a TLV that must make up the whole input
pub fn expect_only(tag: u8, input: &[u8]) -> Result<&[u8], DerError> {
    let (contents, rest) = expect_tlv(tag, input)?;
    if !rest.is_empty() {
        return Err(DerError::TrailingData);
    }
    Ok(contents)
}

/// Append a DER length
pub fn write_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = (len as u32).to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

/// Append a complete TLV
pub fn write_tlv(tag: u8, contents: &[u8], out: &mut Vec<u8>) {
    out.push(tag);
    write_length(contents.len(), out);
    out.extend_from_slice(contents);
}

/// Append a non-negative INTEGER given its big-endian magnitude
///
/// Leading zeros are stripped and a single zero is re-added when the high
/// bit would otherwise mark the value negative.
pub fn write_unsigned_integer(magnitude: &[u8], out: &mut Vec<u8>) {
    let skip = magnitude.iter().take_while(|&&b| b == 0).count();
    let trimmed = &magnitude[skip..];

    let mut contents = Vec::with_capacity(trimmed.len() + 1);
    if trimmed.first().map_or(true, |&b| b & 0x80 != 0) {
        contents.push(0x00);
    }
    contents.extend_from_slice(trimmed);
    write_tlv(TAG_INTEGER, &contents, out);
}

/// Read a non-negative INTEGER, returning its magnitude without sign padding
pub fn read_unsigned_integer(input: &[u8]) -> Result<(&[u8], &[u8]), DerError> {
    let (contents, rest) = expect_tlv(TAG_INTEGER, input)?;
    match contents {
        [] => Err(DerError::Truncated),
        [first, ..] if first & 0x80 != 0 => Err(DerError::Negative),
        [0x00, second, ..] if second & 0x80 == 0 => Err(DerError::NonCanonical),
        [0x00, magnitude @ ..] if !magnitude.is_empty() => Ok((magnitude, rest)),
        _ => Ok((contents, rest)),
    }
}
