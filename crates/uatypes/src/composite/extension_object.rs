// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::builtin::{ByteString, NodeId};
use crate::descriptor::{MemberDescriptor, TypeIndex};
use crate::error::Result;
use crate::ns0::types;
use crate::value::DataType;
use std::mem::offset_of;

/// How the body of an [`ExtensionObject`] is encoded.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExtensionObjectEncoding {
    #[default]
    NoBody = 0,
    ByteString = 1,
    Xml = 2,
}

/// Application-specific payload the receiver may not understand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionObject {
    pub type_id: NodeId,
    pub encoding: ExtensionObjectEncoding,
    pub body: ByteString,
}

impl ExtensionObject {
    pub const MEMBERS: &'static [MemberDescriptor] = &[
        MemberDescriptor::new("type_id", types::NODEID, offset_of!(ExtensionObject, type_id), false),
        MemberDescriptor::new("encoding", types::BYTE, offset_of!(ExtensionObject, encoding), false),
        MemberDescriptor::new("body", types::BYTESTRING, offset_of!(ExtensionObject, body), false),
    ];

    /// Binary-encoded body.
    #[must_use]
    pub fn binary(type_id: NodeId, body: ByteString) -> Self {
        Self {
            type_id,
            encoding: ExtensionObjectEncoding::ByteString,
            body,
        }
    }

    /// XML-encoded body.
    #[must_use]
    pub fn xml(type_id: NodeId, body: ByteString) -> Self {
        Self {
            type_id,
            encoding: ExtensionObjectEncoding::Xml,
            body,
        }
    }

    #[must_use]
    pub fn has_body(&self) -> bool {
        self.encoding != ExtensionObjectEncoding::NoBody
    }
}

impl DataType for ExtensionObject {
    const TYPE_INDEX: TypeIndex = types::EXTENSIONOBJECT;

    fn try_copy(&self) -> Result<Self> {
        Ok(Self {
            type_id: self.type_id.try_copy()?,
            encoding: self.encoding,
            body: self.body.try_copy()?,
        })
    }

    fn delete_members(&mut self) {
        self.type_id.delete_members();
        self.body.delete_members();
    }
}
