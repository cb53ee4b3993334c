// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::descriptor::TypeIndex;
use crate::error::Result;
use crate::ns0::types;
use crate::value::DataType;
use std::fmt;

/// 16-byte globally unique identifier.
///
/// Equality compares all four fields exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    pub const NULL: Self = Self {
        data1: 0,
        data2: 0,
        data3: 0,
        data4: [0; 8],
    };

    /// Pseudo-random Guid drawn from a caller-owned seed.
    ///
    /// Deterministic: the same seed yields the same sequence. Not suitable
    /// for security-sensitive identifiers.
    pub fn random(seed: &mut u32) -> Self {
        let data1 = next(seed);
        let mid = next(seed);
        let hi = next(seed).to_le_bytes();
        let lo = next(seed).to_le_bytes();
        Self {
            data1,
            data2: mid as u16,
            data3: (mid >> 16) as u16,
            data4: [hi[0], hi[1], hi[2], hi[3], lo[0], lo[1], lo[2], lo[3]],
        }
    }

    /// Wire byte order (little-endian fields, `data4` verbatim).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..4].copy_from_slice(&self.data1.to_le_bytes());
        out[4..6].copy_from_slice(&self.data2.to_le_bytes());
        out[6..8].copy_from_slice(&self.data3.to_le_bytes());
        out[8..16].copy_from_slice(&self.data4);
        out
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self {
            data1: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            data2: u16::from_le_bytes([bytes[4], bytes[5]]),
            data3: u16::from_le_bytes([bytes[6], bytes[7]]),
            data4: [
                bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14],
                bytes[15],
            ],
        }
    }
}

// Classic ANSI C LCG constants.
fn next(seed: &mut u32) -> u32 {
    *seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
    *seed
}

impl DataType for Guid {
    const TYPE_INDEX: TypeIndex = types::GUID;

    #[inline]
    fn try_copy(&self) -> Result<Self> {
        Ok(*self)
    }

    #[inline]
    fn delete_members(&mut self) {}
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}
