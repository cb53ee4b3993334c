// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive scalars. Pointer-free: copy is a bit copy, release is a no-op.

use crate::descriptor::TypeIndex;
use crate::error::Result;
use crate::ns0::types;
use crate::status::StatusCode;
use crate::value::DataType;

macro_rules! scalar_type {
    ($($ty:ty => $index:path),* $(,)?) => {
        $(
            impl DataType for $ty {
                const TYPE_INDEX: TypeIndex = $index;

                #[inline]
                fn try_copy(&self) -> Result<Self> {
                    Ok(*self)
                }

                #[inline]
                fn delete_members(&mut self) {}
            }
        )*
    };
}

scalar_type! {
    bool => types::BOOLEAN,
    i8 => types::SBYTE,
    u8 => types::BYTE,
    i16 => types::INT16,
    u16 => types::UINT16,
    i32 => types::INT32,
    u32 => types::UINT32,
    i64 => types::INT64,
    u64 => types::UINT64,
    f32 => types::FLOAT,
    f64 => types::DOUBLE,
    StatusCode => types::STATUSCODE,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_zeroes() {
        let mut b = true;
        b.init();
        assert!(!b);

        let mut d = 3.5f64;
        d.init();
        assert_eq!(d, 0.0);

        let mut s = StatusCode::BAD_OUT_OF_MEMORY;
        s.init();
        assert_eq!(s, StatusCode::GOOD);
    }

    #[test]
    fn test_copy_and_release_keep_value() {
        let mut v = -17i16;
        let copy = v.try_copy().expect("copy");
        v.delete_members();
        assert_eq!(v, -17);
        assert_eq!(copy, v);
    }

    #[test]
    fn test_descriptor_sizes() {
        assert_eq!(u64::descriptor().mem_size, 8);
        assert_eq!(<i8 as DataType>::descriptor().name, "SByte");
        assert_eq!(StatusCode::descriptor().type_id, 19);
        assert!(f32::descriptor().is_pointer_free());
    }
}
