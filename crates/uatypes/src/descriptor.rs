// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: per-type layout metadata.
//!
//! Descriptors are built in `const` context, live in static tables and are
//! never mutated or dropped. The lifecycle engine, the array engine and the
//! external codec all read them.

use crate::array::UaArray;
use crate::builtin::NodeId;
use crate::config::{MAX_TYPE_MEMBERS, MEMBER_TYPE_INDEX_BITS, TYPE_INDEX_BITS};
use crate::error::{Error, Result};
use crate::ns0;

/// Position of a type in its descriptor table.
pub type TypeIndex = u16;

/// Layout of a single member inside a structured type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Field name, as declared.
    pub name: &'static str,
    /// Index of the member's type.
    pub member_type_index: TypeIndex,
    /// `member_type_index` refers to the namespace-zero table rather than the
    /// table of the enclosing type.
    pub namespace_zero: bool,
    /// Byte offset of the member within the parent.
    pub offset: usize,
    /// The member is a counted array of `member_type_index` elements.
    pub is_array: bool,
}

impl MemberDescriptor {
    #[must_use]
    pub const fn new(
        name: &'static str,
        member_type_index: TypeIndex,
        offset: usize,
        is_array: bool,
    ) -> Self {
        Self {
            name,
            member_type_index,
            namespace_zero: true,
            offset,
            is_array,
        }
    }

    /// Resolve the member type against the enclosing table instead of ns0.
    #[must_use]
    pub const fn local(mut self) -> Self {
        self.namespace_zero = false;
        self
    }
}

/// Runtime description of one data type.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Browse name of the type.
    pub name: &'static str,
    /// Position in the owning table.
    pub type_index: TypeIndex,
    /// Numeric identifier of the type node (namespace zero for builtins).
    pub type_id: u32,
    /// In-memory size of one instance.
    pub mem_size: usize,
    /// Defined in namespace zero.
    pub namespace_zero: bool,
    /// No dynamically owned members anywhere in the type.
    pub fixed_size: bool,
    /// In-memory layout equals the wire encoding.
    pub zero_copyable: bool,
    /// Members in declaration order (empty for leaf types).
    pub members: &'static [MemberDescriptor],
}

impl TypeDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, type_index: TypeIndex, type_id: u32, mem_size: usize) -> Self {
        Self {
            name,
            type_index,
            type_id,
            mem_size,
            namespace_zero: true,
            fixed_size: false,
            zero_copyable: false,
            members: &[],
        }
    }

    /// Mark as pointer-free.
    #[must_use]
    pub const fn fixed(mut self) -> Self {
        self.fixed_size = true;
        self
    }

    /// Mark as pointer-free and, on little-endian targets, wire-identical.
    #[must_use]
    pub const fn zero_copy(mut self) -> Self {
        self.fixed_size = true;
        self.zero_copyable = cfg!(target_endian = "little");
        self
    }

    #[must_use]
    pub const fn with_members(mut self, members: &'static [MemberDescriptor]) -> Self {
        self.members = members;
        self
    }

    /// Mark as belonging to an application namespace.
    #[must_use]
    pub const fn custom_namespace(mut self) -> Self {
        self.namespace_zero = false;
        self
    }

    /// `deleteMembers`/`copy` may skip member traversal.
    #[inline]
    #[must_use]
    pub const fn is_pointer_free(&self) -> bool {
        self.fixed_size
    }

    #[inline]
    #[must_use]
    pub const fn is_zero_copyable(&self) -> bool {
        self.zero_copyable
    }

    /// NodeId of the type node, when defined in namespace zero.
    #[must_use]
    pub fn node_id(&self) -> Option<NodeId> {
        self.namespace_zero
            .then(|| NodeId::numeric(0, self.type_id))
    }
}

/// Ordered, read-only catalogue of descriptors indexed by [`TypeIndex`].
#[derive(Debug, Clone, Copy)]
pub struct DescriptorTable {
    types: &'static [TypeDescriptor],
}

impl DescriptorTable {
    #[must_use]
    pub const fn new(types: &'static [TypeDescriptor]) -> Self {
        Self { types }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: TypeIndex) -> Option<&'static TypeDescriptor> {
        self.types.get(usize::from(index))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&'static TypeDescriptor> {
        self.types.iter().find(|d| d.name == name)
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static TypeDescriptor> {
        self.types.iter()
    }

    /// Check the structural invariants every operation relies on.
    ///
    /// - table size fits the type index width
    /// - each descriptor sits at its own `type_index`
    /// - member count within [`MAX_TYPE_MEMBERS`]
    /// - member type indices resolve (against ns0 or this table) and fit
    ///   the member index width when they point into ns0
    /// - member offsets fall inside the parent
    /// - pointer-free types have only pointer-free, non-array members
    pub fn validate(&self) -> Result<()> {
        if self.types.len() > 1usize << TYPE_INDEX_BITS {
            return Err(Error::InvalidArgument(format!(
                "descriptor table holds {} types, index width allows {}",
                self.types.len(),
                1usize << TYPE_INDEX_BITS
            )));
        }

        for (position, desc) in self.types.iter().enumerate() {
            if usize::from(desc.type_index) != position {
                return Err(Error::InvalidArgument(format!(
                    "{} declares index {} but sits at {}",
                    desc.name, desc.type_index, position
                )));
            }
            if desc.members.len() > MAX_TYPE_MEMBERS {
                return Err(Error::InvalidArgument(format!(
                    "{} has {} members (max {})",
                    desc.name,
                    desc.members.len(),
                    MAX_TYPE_MEMBERS
                )));
            }
            if desc.zero_copyable && !desc.fixed_size {
                return Err(Error::InvalidArgument(format!(
                    "{} is zero-copyable but not fixed-size",
                    desc.name
                )));
            }
            for member in desc.members {
                self.validate_member(desc, member)?;
            }
        }
        Ok(())
    }

    fn validate_member(&self, parent: &TypeDescriptor, member: &MemberDescriptor) -> Result<()> {
        let resolved = if member.namespace_zero {
            if u32::from(member.member_type_index) >= 1u32 << MEMBER_TYPE_INDEX_BITS {
                return Err(Error::InvalidArgument(format!(
                    "{}.{} type index {} exceeds member index width",
                    parent.name, member.name, member.member_type_index
                )));
            }
            ns0::table().get(member.member_type_index)
        } else {
            self.get(member.member_type_index)
        };
        let Some(member_type) = resolved else {
            return Err(Error::UnknownType(member.member_type_index));
        };

        if member.offset >= parent.mem_size {
            return Err(Error::InvalidArgument(format!(
                "{}.{} offset {} outside {} byte layout",
                parent.name, member.name, member.offset, parent.mem_size
            )));
        }
        if member.is_array && member.offset + std::mem::size_of::<UaArray<u8>>() > parent.mem_size {
            return Err(Error::InvalidArgument(format!(
                "{}.{} array header does not fit",
                parent.name, member.name
            )));
        }
        if parent.fixed_size && (member.is_array || !member_type.fixed_size) {
            return Err(Error::InvalidArgument(format!(
                "{} is fixed-size but {}.{} owns memory",
                parent.name, parent.name, member.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ns0::types;

    static PAIR_MEMBERS: [MemberDescriptor; 2] = [
        MemberDescriptor::new("count", types::UINT32, 0, false),
        MemberDescriptor::new("label", types::STRING, 8, false),
    ];

    static CUSTOM: [TypeDescriptor; 2] = [
        TypeDescriptor::new("Pair", 0, 5001, 32)
            .custom_namespace()
            .with_members(&PAIR_MEMBERS),
        TypeDescriptor::new("Misplaced", 7, 5002, 4).custom_namespace().fixed(),
    ];

    static DANGLING_MEMBERS: [MemberDescriptor; 1] =
        [MemberDescriptor::new("next", 3, 0, false).local()];

    static DANGLING: [TypeDescriptor; 1] =
        [TypeDescriptor::new("Dangling", 0, 5003, 8).custom_namespace().with_members(&DANGLING_MEMBERS)];

    static FIXED_WITH_STRING_MEMBERS: [MemberDescriptor; 1] =
        [MemberDescriptor::new("label", types::STRING, 0, false)];

    static FIXED_WITH_STRING: [TypeDescriptor; 1] = [TypeDescriptor::new("Broken", 0, 5004, 24)
        .custom_namespace()
        .fixed()
        .with_members(&FIXED_WITH_STRING_MEMBERS)];

    #[test]
    fn test_builder_flags() {
        let d = TypeDescriptor::new("UInt32", 6, 7, 4).zero_copy();
        assert!(d.is_pointer_free());
        assert_eq!(d.is_zero_copyable(), cfg!(target_endian = "little"));
        assert_eq!(d.node_id(), Some(NodeId::numeric(0, 7)));

        let custom = TypeDescriptor::new("Custom", 0, 1, 1).custom_namespace();
        assert!(custom.node_id().is_none());
        assert!(!custom.is_pointer_free());
    }

    #[test]
    fn test_validate_rejects_misplaced_index() {
        let table = DescriptorTable::new(&CUSTOM);
        let err = table.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.contains("Misplaced")));
    }

    #[test]
    fn test_validate_rejects_dangling_member() {
        let table = DescriptorTable::new(&DANGLING);
        assert_eq!(table.validate(), Err(Error::UnknownType(3)));
    }

    #[test]
    fn test_validate_rejects_fixed_type_owning_memory() {
        let table = DescriptorTable::new(&FIXED_WITH_STRING);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_lookup() {
        let table = DescriptorTable::new(&CUSTOM[..1]);
        assert!(table.validate().is_ok());
        assert_eq!(table.len(), 1);
        assert_eq!(table.by_name("Pair").map(|d| d.type_id), Some(5001));
        assert!(table.get(1).is_none());
    }
}
