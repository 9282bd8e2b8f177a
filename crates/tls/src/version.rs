//! TLS protocol versions

use core::fmt;

/// `ProtocolVersion` as carried on the wire: `{ major, minor }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolVersion {
    pub major: u8,
    pub minor: u8,
}

impl ProtocolVersion {
    pub const SSLV3: Self = Self::new(3, 0);
    pub const TLSV1_0: Self = Self::new(3, 1);
    pub const TLSV1_1: Self = Self::new(3, 2);
    pub const TLSV1_2: Self = Self::new(3, 3);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self::new(bytes[0], bytes[1])
    }

    pub const fn to_bytes(self) -> [u8; 2] {
        [self.major, self.minor]
    }

    /// Whether `self` is `other` or an older version
    pub fn is_equal_or_earlier(self, other: Self) -> bool {
        self <= other
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SSLV3 => f.write_str("SSLv3"),
            Self::TLSV1_0 => f.write_str("TLSv1"),
            Self::TLSV1_1 => f.write_str("TLSv1.1"),
            Self::TLSV1_2 => f.write_str("TLSv1.2"),
            Self { major, minor } => write!(f, "{}.{}", major, minor),
        }
    }
}
