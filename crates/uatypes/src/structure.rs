// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor-driven structured types.
//!
//! [`ua_structure!`](crate::ua_structure) declares a struct together with its
//! member table and a member-wise lifecycle: copy walks the members in
//! declaration order and stops at the first failure, release walks them all.
//!
//! ```
//! use uatypes::{ns0::types, ua_structure, DataType, UaString};
//!
//! fn pair_descriptor() -> &'static uatypes::TypeDescriptor {
//!     uatypes::ns0::descriptor(types::QUALIFIEDNAME).unwrap()
//! }
//!
//! ua_structure! {
//!     /// Local mirror of a namespace-zero layout.
//!     pub struct Pair: types::QUALIFIEDNAME, descriptor = pair_descriptor {
//!         pub index: u16,
//!         pub label: UaString,
//!     }
//! }
//!
//! let p = Pair { index: 2, label: UaString::from_static("x") };
//! assert_eq!(Pair::MEMBERS.len(), 2);
//! assert_eq!(p.try_copy().unwrap(), p);
//! ```

/// Declare a structured type with its member descriptors and lifecycle.
///
/// Every field type must implement [`Member`](crate::value::Member): any
/// [`DataType`](crate::value::DataType), or a
/// [`UaArray`](crate::array::UaArray) of one. Types outside namespace zero
/// pass `descriptor = path::to::fn` returning their descriptor.
#[macro_export]
macro_rules! ua_structure {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $index:path $(, descriptor = $desc:path)? {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $fty,
            )*
        }

        impl $name {
            /// Member table, in declaration order.
            pub const MEMBERS: &'static [$crate::descriptor::MemberDescriptor] = &[
                $(
                    $crate::descriptor::MemberDescriptor::new(
                        stringify!($field),
                        <$fty as $crate::value::Member>::MEMBER_TYPE_INDEX,
                        ::std::mem::offset_of!($name, $field),
                        <$fty as $crate::value::Member>::IS_ARRAY,
                    ),
                )*
            ];
        }

        impl $crate::value::DataType for $name {
            const TYPE_INDEX: $crate::descriptor::TypeIndex = $index;

            $(
                fn descriptor() -> &'static $crate::descriptor::TypeDescriptor {
                    $desc()
                }
            )?

            fn try_copy(&self) -> $crate::error::Result<Self> {
                Ok(Self {
                    $(
                        $field: $crate::value::Member::copy_member(&self.$field)?,
                    )*
                })
            }

            fn delete_members(&mut self) {
                $(
                    $crate::value::Member::release_member(&mut self.$field);
                )*
            }
        }
    };
}
