// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Protocol structures from the namespace-zero schema.

use crate::array::UaArray;
use crate::builtin::{LocalizedText, NodeId, QualifiedName, UaString};
use crate::ns0::types;

crate::ua_structure! {
    /// A method argument definition.
    pub struct Argument: types::ARGUMENT {
        pub name: UaString,
        pub data_type: NodeId,
        pub value_rank: i32,
        pub array_dimensions: UaArray<u32>,
        pub description: LocalizedText,
    }
}

crate::ua_structure! {
    /// The target of a read: node, attribute, optional index range and encoding.
    pub struct ReadValueId: types::READVALUEID {
        pub node_id: NodeId,
        pub attribute_id: u32,
        pub index_range: UaString,
        pub data_encoding: QualifiedName,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DataType;

    #[test]
    fn test_argument_copy_with_dimensions() {
        let src = Argument {
            name: UaString::from_static("setpoint"),
            data_type: NodeId::numeric(0, 11),
            value_rank: 1,
            array_dimensions: UaArray::from_vec(vec![3]).expect("dims"),
            description: LocalizedText::copy_cstring("Target value").expect("text"),
        };
        let mut copy = src.try_copy().expect("copy");
        assert_eq!(copy, src);

        if let Some(dims) = copy.array_dimensions.as_mut_slice() {
            dims[0] = 4;
        }
        assert_eq!(src.array_dimensions.as_slice(), Some(&[3u32][..]));

        copy.delete_members();
        assert!(copy.array_dimensions.is_null());
        assert!(copy.name.is_null());
        assert_eq!(copy.value_rank, 1);
    }

    #[test]
    fn test_read_value_id_defaults() {
        let mut id = ReadValueId {
            node_id: NodeId::numeric(1, 1001),
            attribute_id: 13,
            ..ReadValueId::default()
        };
        assert!(id.index_range.is_null());
        assert!(id.data_encoding.name.is_null());
        id.init();
        assert_eq!(id, ReadValueId::default());
    }
}
