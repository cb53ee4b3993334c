// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Namespace-zero type catalogue.
//!
//! Index order follows the builtin type numbering (Boolean first,
//! DiagnosticInfo last) followed by the generated protocol structures.
//! Indices are stable; the codec and the variant type tags depend on them.

use crate::builtin::{
    ByteString, DateTime, ExpandedNodeId, Guid, LocalizedText, NodeId, QualifiedName, UaString,
    XmlElement,
};
use crate::composite::{DataValue, DiagnosticInfo, ExtensionObject};
use crate::descriptor::{DescriptorTable, TypeDescriptor, TypeIndex};
use crate::generated::{Argument, ReadValueId};
use crate::status::StatusCode;
use crate::variant::Variant;
use std::mem::size_of;

/// Type indices into [`NS0_TYPES`].
pub mod types {
    use crate::descriptor::TypeIndex;

    pub const BOOLEAN: TypeIndex = 0;
    pub const SBYTE: TypeIndex = 1;
    pub const BYTE: TypeIndex = 2;
    pub const INT16: TypeIndex = 3;
    pub const UINT16: TypeIndex = 4;
    pub const INT32: TypeIndex = 5;
    pub const UINT32: TypeIndex = 6;
    pub const INT64: TypeIndex = 7;
    pub const UINT64: TypeIndex = 8;
    pub const FLOAT: TypeIndex = 9;
    pub const DOUBLE: TypeIndex = 10;
    pub const STRING: TypeIndex = 11;
    pub const DATETIME: TypeIndex = 12;
    pub const GUID: TypeIndex = 13;
    pub const BYTESTRING: TypeIndex = 14;
    pub const XMLELEMENT: TypeIndex = 15;
    pub const NODEID: TypeIndex = 16;
    pub const EXPANDEDNODEID: TypeIndex = 17;
    pub const STATUSCODE: TypeIndex = 18;
    pub const QUALIFIEDNAME: TypeIndex = 19;
    pub const LOCALIZEDTEXT: TypeIndex = 20;
    pub const EXTENSIONOBJECT: TypeIndex = 21;
    pub const DATAVALUE: TypeIndex = 22;
    pub const VARIANT: TypeIndex = 23;
    pub const DIAGNOSTICINFO: TypeIndex = 24;
    pub const ARGUMENT: TypeIndex = 25;
    pub const READVALUEID: TypeIndex = 26;
}

/// Well-known numeric node ids in namespace zero.
pub mod ids {
    pub const HAS_TYPE_DEFINITION: u32 = 40;
    pub const ORGANIZES: u32 = 35;
    pub const HAS_PROPERTY: u32 = 46;
    pub const HAS_COMPONENT: u32 = 47;
    pub const BASE_DATA_VARIABLE_TYPE: u32 = 63;
    pub const ROOT_FOLDER: u32 = 84;
    pub const OBJECTS_FOLDER: u32 = 85;
    pub const TYPES_FOLDER: u32 = 86;
    pub const VIEWS_FOLDER: u32 = 87;
    pub const SERVER: u32 = 2253;
}

/// Number of descriptors in [`NS0_TYPES`].
pub const TYPE_COUNT: usize = 27;

/// Descriptor table for namespace zero.
pub static NS0_TYPES: [TypeDescriptor; TYPE_COUNT] = [
    TypeDescriptor::new("Boolean", types::BOOLEAN, 1, size_of::<bool>()).fixed(),
    TypeDescriptor::new("SByte", types::SBYTE, 2, size_of::<i8>()).zero_copy(),
    TypeDescriptor::new("Byte", types::BYTE, 3, size_of::<u8>()).zero_copy(),
    TypeDescriptor::new("Int16", types::INT16, 4, size_of::<i16>()).zero_copy(),
    TypeDescriptor::new("UInt16", types::UINT16, 5, size_of::<u16>()).zero_copy(),
    TypeDescriptor::new("Int32", types::INT32, 6, size_of::<i32>()).zero_copy(),
    TypeDescriptor::new("UInt32", types::UINT32, 7, size_of::<u32>()).zero_copy(),
    TypeDescriptor::new("Int64", types::INT64, 8, size_of::<i64>()).zero_copy(),
    TypeDescriptor::new("UInt64", types::UINT64, 9, size_of::<u64>()).zero_copy(),
    TypeDescriptor::new("Float", types::FLOAT, 10, size_of::<f32>()).zero_copy(),
    TypeDescriptor::new("Double", types::DOUBLE, 11, size_of::<f64>()).zero_copy(),
    TypeDescriptor::new("String", types::STRING, 12, size_of::<UaString>()),
    TypeDescriptor::new("DateTime", types::DATETIME, 13, size_of::<DateTime>()).zero_copy(),
    TypeDescriptor::new("Guid", types::GUID, 14, size_of::<Guid>()).zero_copy(),
    TypeDescriptor::new("ByteString", types::BYTESTRING, 15, size_of::<ByteString>()),
    TypeDescriptor::new("XmlElement", types::XMLELEMENT, 16, size_of::<XmlElement>()),
    TypeDescriptor::new("NodeId", types::NODEID, 17, size_of::<NodeId>()),
    TypeDescriptor::new("ExpandedNodeId", types::EXPANDEDNODEID, 18, size_of::<ExpandedNodeId>())
        .with_members(ExpandedNodeId::MEMBERS),
    TypeDescriptor::new("StatusCode", types::STATUSCODE, 19, size_of::<StatusCode>()).zero_copy(),
    TypeDescriptor::new("QualifiedName", types::QUALIFIEDNAME, 20, size_of::<QualifiedName>())
        .with_members(QualifiedName::MEMBERS),
    TypeDescriptor::new("LocalizedText", types::LOCALIZEDTEXT, 21, size_of::<LocalizedText>())
        .with_members(LocalizedText::MEMBERS),
    TypeDescriptor::new("ExtensionObject", types::EXTENSIONOBJECT, 22, size_of::<ExtensionObject>())
        .with_members(ExtensionObject::MEMBERS),
    TypeDescriptor::new("DataValue", types::DATAVALUE, 23, size_of::<DataValue>())
        .with_members(DataValue::MEMBERS),
    TypeDescriptor::new("Variant", types::VARIANT, 24, size_of::<Variant>()),
    TypeDescriptor::new("DiagnosticInfo", types::DIAGNOSTICINFO, 25, size_of::<DiagnosticInfo>())
        .with_members(DiagnosticInfo::MEMBERS),
    TypeDescriptor::new("Argument", types::ARGUMENT, 296, size_of::<Argument>())
        .with_members(Argument::MEMBERS),
    TypeDescriptor::new("ReadValueId", types::READVALUEID, 626, size_of::<ReadValueId>())
        .with_members(ReadValueId::MEMBERS),
];

/// The namespace-zero table.
#[inline]
#[must_use]
pub const fn table() -> DescriptorTable {
    DescriptorTable::new(&NS0_TYPES)
}

/// Descriptor at `index`, if it exists.
#[inline]
#[must_use]
pub fn descriptor(index: TypeIndex) -> Option<&'static TypeDescriptor> {
    NS0_TYPES.get(usize::from(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_valid() {
        table().validate().expect("ns0 table must validate");
        assert_eq!(table().len(), TYPE_COUNT);
    }

    #[test]
    fn test_type_ids() {
        assert_eq!(NS0_TYPES[usize::from(types::BOOLEAN)].type_id, 1);
        assert_eq!(NS0_TYPES[usize::from(types::INT32)].type_id, 6);
        assert_eq!(NS0_TYPES[usize::from(types::DIAGNOSTICINFO)].type_id, 25);
        assert_eq!(
            table().by_name("ReadValueId").map(|d| d.type_index),
            Some(types::READVALUEID)
        );
    }

    #[test]
    fn test_leaf_flags() {
        let string = descriptor(types::STRING).expect("string");
        assert!(!string.is_pointer_free());
        assert!(string.members.is_empty());

        let boolean = descriptor(types::BOOLEAN).expect("boolean");
        assert!(boolean.is_pointer_free());
        assert!(!boolean.is_zero_copyable());

        let guid = descriptor(types::GUID).expect("guid");
        assert_eq!(guid.mem_size, 16);
        assert!(guid.is_pointer_free());
    }

    #[test]
    fn test_structured_members() {
        let qn = descriptor(types::QUALIFIEDNAME).expect("qualified name");
        let names: Vec<_> = qn.members.iter().map(|m| m.name).collect();
        assert_eq!(names, ["namespace_index", "name"]);
        assert_eq!(qn.members[1].member_type_index, types::STRING);

        let arg = descriptor(types::ARGUMENT).expect("argument");
        let dims = arg
            .members
            .iter()
            .find(|m| m.name == "array_dimensions")
            .expect("array member");
        assert!(dims.is_array);
        assert_eq!(dims.member_type_index, types::UINT32);

        let diag = descriptor(types::DIAGNOSTICINFO).expect("diagnostic info");
        assert_eq!(
            diag.members.last().map(|m| m.member_type_index),
            Some(types::DIAGNOSTICINFO)
        );
    }
}
