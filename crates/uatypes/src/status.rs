// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Status codes shared with the protocol layers.
//!
//! The full catalogue lives outside this crate; only the codes produced by the
//! type system itself are named here. Any other `u32` is carried through
//! opaquely.

use std::fmt;

/// Numeric result of an operation, as carried on the wire.
///
/// The top two bits encode severity (`00` good, `01` uncertain, `10` bad).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const GOOD: Self = Self(0x0000_0000);
    pub const BAD_INTERNAL_ERROR: Self = Self(0x8002_0000);
    pub const BAD_OUT_OF_MEMORY: Self = Self(0x8003_0000);
    pub const BAD_ENCODING_ERROR: Self = Self(0x8006_0000);
    pub const BAD_NOT_SUPPORTED: Self = Self(0x803D_0000);
    pub const BAD_TYPE_MISMATCH: Self = Self(0x8074_0000);
    pub const BAD_INVALID_ARGUMENT: Self = Self(0x80AB_0000);

    const SEVERITY_MASK: u32 = 0xC000_0000;
    const SEVERITY_BAD: u32 = 0x8000_0000;
    const SEVERITY_UNCERTAIN: u32 = 0x4000_0000;

    /// Raw code value.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_good(self) -> bool {
        self.0 & Self::SEVERITY_MASK == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_uncertain(self) -> bool {
        self.0 & Self::SEVERITY_MASK == Self::SEVERITY_UNCERTAIN
    }

    #[inline]
    #[must_use]
    pub const fn is_bad(self) -> bool {
        self.0 & Self::SEVERITY_MASK == Self::SEVERITY_BAD
    }

    /// Symbolic name for the codes known to this crate.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::GOOD => Some("Good"),
            Self::BAD_INTERNAL_ERROR => Some("BadInternalError"),
            Self::BAD_OUT_OF_MEMORY => Some("BadOutOfMemory"),
            Self::BAD_ENCODING_ERROR => Some("BadEncodingError"),
            Self::BAD_NOT_SUPPORTED => Some("BadNotSupported"),
            Self::BAD_TYPE_MISMATCH => Some("BadTypeMismatch"),
            Self::BAD_INVALID_ARGUMENT => Some("BadInvalidArgument"),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:08X})", name, self.0),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}

impl From<u32> for StatusCode {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<StatusCode> for u32 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_bits() {
        assert!(StatusCode::GOOD.is_good());
        assert!(StatusCode::BAD_OUT_OF_MEMORY.is_bad());
        assert!(!StatusCode::BAD_OUT_OF_MEMORY.is_good());
        assert!(StatusCode(0x4000_0000).is_uncertain());
    }

    #[test]
    fn test_display_known_and_opaque() {
        assert_eq!(
            StatusCode::BAD_NOT_SUPPORTED.to_string(),
            "BadNotSupported (0x803D0000)"
        );
        assert_eq!(StatusCode(0x8123_0000).to_string(), "0x81230000");
    }
}
