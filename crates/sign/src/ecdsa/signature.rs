//! ECDSA signature values and their wire encodings

use sigil_api::{Error, NamedCurve, Result, ResultExt, SignatureEncoding};
use sigil_internal::der;

/// ECDSA signature components (r, s)
///
/// Both are non-negative big-endian integers stored without leading zero
/// bytes (zero itself is `[0x00]`). A signature produced by the engine has
/// `r, s` in `[1, n-1]`; a decoded one may hold any value, verification
/// does the range check.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EcdsaSignature {
    r: Vec<u8>,
    s: Vec<u8>,
}

impl EcdsaSignature {
    pub fn new(r: &[u8], s: &[u8]) -> Self {
        Self {
            r: minimal(r),
            s: minimal(s),
        }
    }

    pub fn r(&self) -> &[u8] {
        &self.r
    }

    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Serialize to DER: `SEQUENCE { INTEGER r, INTEGER s }`
    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.r.len() + self.s.len() + 6);
        der::write_unsigned_integer(&self.r, &mut body);
        der::write_unsigned_integer(&self.s, &mut body);

        let mut out = Vec::with_capacity(body.len() + 4);
        der::write_tlv(der::TAG_SEQUENCE, &body, &mut out);
        out
    }

    /// Parse from DER, rejecting negative integers, non-minimal encodings
    /// and trailing bytes
    pub fn from_der(input: &[u8]) -> Result<Self> {
        let body = der::expect_only(der::TAG_SEQUENCE, input).with_context("ECDSA signature")?;
        let (r, rest) = der::read_unsigned_integer(body).with_context("ECDSA signature r")?;
        let (s, rest) = der::read_unsigned_integer(rest).with_context("ECDSA signature s")?;
        if !rest.is_empty() {
            return Err(Error::Encoding {
                context: "ECDSA signature",
                message: "trailing data in SEQUENCE".into(),
            });
        }
        Ok(Self::new(r, s))
    }

    /// Serialize as `r || s`, each left-padded to `size` bytes
    pub fn to_plain(&self, size: usize) -> Result<Vec<u8>> {
        for part in [&self.r, &self.s] {
            if part.len() > size {
                return Err(Error::InvalidLength {
                    context: "plain ECDSA signature",
                    expected: size,
                    actual: part.len(),
                });
            }
        }

        let mut out = vec![0u8; 2 * size];
        out[size - self.r.len()..size].copy_from_slice(&self.r);
        out[2 * size - self.s.len()..].copy_from_slice(&self.s);
        Ok(out)
    }

    /// Parse `r || s` where each half is `size` bytes
    pub fn from_plain(input: &[u8], size: usize) -> Result<Self> {
        if input.len() != 2 * size {
            return Err(Error::InvalidLength {
                context: "plain ECDSA signature",
                expected: 2 * size,
                actual: input.len(),
            });
        }
        let (r, s) = input.split_at(size);
        Ok(Self::new(r, s))
    }

    /// Encode for `curve` in the given wire format
    pub fn encode(&self, encoding: SignatureEncoding, curve: NamedCurve) -> Result<Vec<u8>> {
        match encoding {
            SignatureEncoding::Der => Ok(self.to_der()),
            SignatureEncoding::Plain => self.to_plain(curve.scalar_size()),
        }
    }

    pub fn decode(input: &[u8], encoding: SignatureEncoding, curve: NamedCurve) -> Result<Self> {
        match encoding {
            SignatureEncoding::Der => Self::from_der(input),
            SignatureEncoding::Plain => Self::from_plain(input, curve.scalar_size()),
        }
    }
}

fn minimal(bytes: &[u8]) -> Vec<u8> {
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    if skip == bytes.len() {
        vec![0]
    } else {
        bytes[skip..].to_vec()
    }
}
