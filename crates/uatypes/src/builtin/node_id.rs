// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node identifiers.

use super::{ByteString, Guid, UaString};
use crate::descriptor::TypeIndex;
use crate::error::Result;
use crate::ns0::types;
use crate::value::DataType;
use std::fmt;

/// Wire tag of an [`Identifier`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierType {
    Numeric = 2,
    String = 3,
    Guid = 4,
    ByteString = 5,
}

/// Identifier payload, tagged by kind.
///
/// Equality requires the same kind and a deep-equal payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Numeric(u32),
    String(UaString),
    Guid(Guid),
    ByteString(ByteString),
}

impl Default for Identifier {
    fn default() -> Self {
        Self::Numeric(0)
    }
}

impl Identifier {
    #[must_use]
    pub fn kind(&self) -> IdentifierType {
        match self {
            Self::Numeric(_) => IdentifierType::Numeric,
            Self::String(_) => IdentifierType::String,
            Self::Guid(_) => IdentifierType::Guid,
            Self::ByteString(_) => IdentifierType::ByteString,
        }
    }
}

/// Address of a node: namespace index plus identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub namespace_index: u16,
    pub identifier: Identifier,
}

impl NodeId {
    /// Numeric id, usable in constants.
    #[must_use]
    pub const fn numeric(namespace_index: u16, id: u32) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Numeric(id),
        }
    }

    #[must_use]
    pub fn string(namespace_index: u16, id: UaString) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::String(id),
        }
    }

    #[must_use]
    pub fn guid(namespace_index: u16, id: Guid) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Guid(id),
        }
    }

    #[must_use]
    pub fn byte_string(namespace_index: u16, id: ByteString) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::ByteString(id),
        }
    }

    /// True iff the identifier is `Numeric(0)`. The namespace index is not
    /// consulted.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.identifier, Identifier::Numeric(0))
    }

    #[must_use]
    pub fn identifier_type(&self) -> IdentifierType {
        self.identifier.kind()
    }
}

impl DataType for NodeId {
    const TYPE_INDEX: TypeIndex = types::NODEID;

    fn try_copy(&self) -> Result<Self> {
        let identifier = match &self.identifier {
            Identifier::Numeric(n) => Identifier::Numeric(*n),
            Identifier::String(s) => Identifier::String(s.try_copy()?),
            Identifier::Guid(g) => Identifier::Guid(*g),
            Identifier::ByteString(b) => Identifier::ByteString(b.try_copy()?),
        };
        Ok(Self {
            namespace_index: self.namespace_index,
            identifier,
        })
    }

    fn delete_members(&mut self) {
        match &mut self.identifier {
            Identifier::String(s) => s.delete_members(),
            Identifier::ByteString(b) => b.delete_members(),
            Identifier::Numeric(_) | Identifier::Guid(_) => {}
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ns={};", self.namespace_index)?;
        match &self.identifier {
            Identifier::Numeric(n) => write!(f, "i={}", n),
            Identifier::String(s) => write!(f, "s={}", s),
            Identifier::Guid(g) => write!(f, "g={}", g),
            Identifier::ByteString(b) => {
                f.write_str("b=")?;
                for byte in b.as_bytes().unwrap_or_default() {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ns0::ids;

    #[test]
    fn test_is_null_ignores_namespace() {
        assert!(NodeId::numeric(0, 0).is_null());
        assert!(NodeId::numeric(5, 0).is_null());
        assert!(NodeId::default().is_null());
        assert!(!NodeId::numeric(0, ids::OBJECTS_FOLDER).is_null());
        assert!(!NodeId::string(0, UaString::from_static("0")).is_null());
        assert!(!NodeId::guid(0, Guid::NULL).is_null());
    }

    #[test]
    fn test_equality_by_kind_and_payload() {
        let a = NodeId::string(1, UaString::from_static("pump"));
        let b = NodeId::string(1, UaString::copy_cstring("pump").expect("string"));
        assert_eq!(a, b);
        assert_ne!(a, NodeId::string(2, UaString::from_static("pump")));
        assert_ne!(
            NodeId::byte_string(1, ByteString::from_static("pump")),
            a
        );
        assert_ne!(NodeId::numeric(0, 1), NodeId::numeric(0, 2));
    }

    #[test]
    fn test_copy_is_deep() {
        let src = NodeId::byte_string(3, ByteString::from_vec(vec![0xde, 0xad]));
        let mut copy = src.try_copy().expect("copy");
        assert_eq!(copy, src);
        copy.delete_members();
        assert_eq!(copy.identifier, Identifier::ByteString(ByteString::null()));
        assert_eq!(src.identifier_type(), IdentifierType::ByteString);
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeId::numeric(0, 85).to_string(), "ns=0;i=85");
        assert_eq!(
            NodeId::string(2, UaString::from_static("a.b")).to_string(),
            "ns=2;s=a.b"
        );
        assert_eq!(
            NodeId::byte_string(1, ByteString::from_vec(vec![0xde, 0xad])).to_string(),
            "ns=1;b=dead"
        );
        assert_eq!(IdentifierType::Guid as u8, 4);
    }
}
