// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structured builtins: [`ExpandedNodeId`], [`QualifiedName`], [`LocalizedText`].

use super::{NodeId, UaString};
use crate::error::Result;
use crate::ns0::types;
use std::fmt;

crate::ua_structure! {
    /// A [`NodeId`] optionally qualified by namespace URI and server.
    pub struct ExpandedNodeId: types::EXPANDEDNODEID {
        pub node_id: NodeId,
        /// Absent when null.
        pub namespace_uri: UaString,
        /// Absent when 0.
        pub server_index: u32,
    }
}

impl ExpandedNodeId {
    /// Numeric id with no namespace URI and server index 0.
    #[must_use]
    pub const fn numeric(namespace_index: u16, id: u32) -> Self {
        Self {
            node_id: NodeId::numeric(namespace_index, id),
            namespace_uri: UaString::null(),
            server_index: 0,
        }
    }

    /// Same null rule as [`NodeId::is_null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.node_id.is_null()
    }

    #[must_use]
    pub fn has_namespace_uri(&self) -> bool {
        !self.namespace_uri.is_null()
    }

    #[must_use]
    pub fn has_server_index(&self) -> bool {
        self.server_index != 0
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: UaString::null(),
            server_index: 0,
        }
    }
}

crate::ua_structure! {
    /// A name qualified by a namespace index.
    pub struct QualifiedName: types::QUALIFIEDNAME {
        pub namespace_index: u16,
        pub name: UaString,
    }
}

impl QualifiedName {
    #[must_use]
    pub fn new(namespace_index: u16, name: UaString) -> Self {
        Self {
            namespace_index,
            name,
        }
    }

    /// Namespace 0 with an owned copy of `text`.
    pub fn copy_cstring(text: &str) -> Result<Self> {
        Ok(Self::new(0, UaString::copy_cstring(text)?))
    }

    /// Namespace 0, borrowing a literal.
    #[must_use]
    pub fn from_static(text: &'static str) -> Self {
        Self::new(0, UaString::from_static(text))
    }

    /// Log the name under `label` at debug level.
    pub fn log_debug(&self, label: &str) {
        log::debug!("[names] {} {}", label, self);
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{NamespaceIndex={}, Length={}, Data={}}}",
            self.namespace_index,
            self.name.len(),
            self.name
        )
    }
}

crate::ua_structure! {
    /// Human-readable text with an optional locale.
    pub struct LocalizedText: types::LOCALIZEDTEXT {
        pub locale: UaString,
        pub text: UaString,
    }
}

impl LocalizedText {
    #[must_use]
    pub fn new(locale: UaString, text: UaString) -> Self {
        Self { locale, text }
    }

    /// Locale `"en"` with an owned copy of `text`.
    pub fn copy_cstring(text: &str) -> Result<Self> {
        Ok(Self::new(
            UaString::copy_cstring("en")?,
            UaString::copy_cstring(text)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DataType;

    #[test]
    fn test_qualified_name_from_text() {
        let qn = QualifiedName::copy_cstring("the answer").expect("name");
        assert_eq!(qn.namespace_index, 0);
        assert_eq!(qn.name.len(), 10);
        assert_eq!(qn.name.as_bytes(), Some(&b"the answer"[..]));
        assert_eq!(
            qn.to_string(),
            "{NamespaceIndex=0, Length=10, Data=the answer}"
        );
        qn.log_debug("browse name");
    }

    #[test]
    fn test_localized_text_defaults_locale() {
        let lt = LocalizedText::copy_cstring("Temperature").expect("text");
        assert_eq!(lt.locale.as_str(), Some("en"));
        assert_eq!(lt.text.as_str(), Some("Temperature"));

        let mut copy = lt.try_copy().expect("copy");
        assert_eq!(copy, lt);
        copy.delete_members();
        assert!(copy.locale.is_null() && copy.text.is_null());
    }

    #[test]
    fn test_expanded_node_id_optional_parts() {
        let mut id = ExpandedNodeId::numeric(0, 85);
        assert!(!id.is_null());
        assert!(!id.has_namespace_uri());
        assert!(!id.has_server_index());

        id.namespace_uri = UaString::from_static("urn:plant");
        id.server_index = 2;
        assert!(id.has_namespace_uri() && id.has_server_index());
        assert!(ExpandedNodeId::from(NodeId::numeric(9, 0)).is_null());
    }

    #[test]
    fn test_member_tables() {
        assert_eq!(ExpandedNodeId::MEMBERS.len(), 3);
        assert_eq!(ExpandedNodeId::MEMBERS[0].member_type_index, types::NODEID);
        assert_eq!(LocalizedText::MEMBERS[1].name, "text");
    }
}
