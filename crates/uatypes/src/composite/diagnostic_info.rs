// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::alloc::{try_box, try_vec};
use crate::builtin::UaString;
use crate::descriptor::{MemberDescriptor, TypeIndex};
use crate::error::Result;
use crate::ns0::types;
use crate::status::StatusCode;
use crate::value::DataType;
use std::mem::offset_of;

/// Detailed error information attached to a status code.
///
/// The string-table fields (`symbolic_id` .. `locale`) are indices into the
/// response string table. `inner_diagnostic_info` is an exclusively owned
/// nested record, so the structure is a finite chain. Copy, release and
/// drop walk the chain iteratively, whatever its depth.
#[derive(Debug, Default)]
pub struct DiagnosticInfo {
    pub symbolic_id: Option<i32>,
    pub namespace_uri: Option<i32>,
    pub localized_text: Option<i32>,
    pub locale: Option<i32>,
    pub additional_info: Option<UaString>,
    pub inner_status_code: Option<StatusCode>,
    pub inner_diagnostic_info: Option<Box<DiagnosticInfo>>,
}

impl DiagnosticInfo {
    pub const HAS_SYMBOLIC_ID: u8 = 0x01;
    pub const HAS_NAMESPACE_URI: u8 = 0x02;
    pub const HAS_LOCALIZED_TEXT: u8 = 0x04;
    pub const HAS_LOCALE: u8 = 0x08;
    pub const HAS_ADDITIONAL_INFO: u8 = 0x10;
    pub const HAS_INNER_STATUS_CODE: u8 = 0x20;
    pub const HAS_INNER_DIAGNOSTIC_INFO: u8 = 0x40;

    pub const MEMBERS: &'static [MemberDescriptor] = &[
        MemberDescriptor::new("symbolic_id", types::INT32, offset_of!(DiagnosticInfo, symbolic_id), false),
        MemberDescriptor::new(
            "namespace_uri",
            types::INT32,
            offset_of!(DiagnosticInfo, namespace_uri),
            false,
        ),
        MemberDescriptor::new(
            "localized_text",
            types::INT32,
            offset_of!(DiagnosticInfo, localized_text),
            false,
        ),
        MemberDescriptor::new("locale", types::INT32, offset_of!(DiagnosticInfo, locale), false),
        MemberDescriptor::new(
            "additional_info",
            types::STRING,
            offset_of!(DiagnosticInfo, additional_info),
            false,
        ),
        MemberDescriptor::new(
            "inner_status_code",
            types::STATUSCODE,
            offset_of!(DiagnosticInfo, inner_status_code),
            false,
        ),
        MemberDescriptor::new(
            "inner_diagnostic_info",
            types::DIAGNOSTICINFO,
            offset_of!(DiagnosticInfo, inner_diagnostic_info),
            false,
        ),
    ];

    #[must_use]
    pub fn with_symbolic_id(mut self, index: i32) -> Self {
        self.symbolic_id = Some(index);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, index: i32) -> Self {
        self.locale = Some(index);
        self
    }

    #[must_use]
    pub fn with_additional_info(mut self, info: UaString) -> Self {
        self.additional_info = Some(info);
        self
    }

    #[must_use]
    pub fn with_inner_status_code(mut self, code: StatusCode) -> Self {
        self.inner_status_code = Some(code);
        self
    }

    /// Nest `inner` below this record.
    #[must_use]
    pub fn with_inner(mut self, inner: DiagnosticInfo) -> Self {
        self.inner_diagnostic_info = Some(Box::new(inner));
        self
    }

    /// Presence bits in declaration order.
    #[must_use]
    pub fn encoding_mask(&self) -> u8 {
        let mut mask = 0;
        if self.symbolic_id.is_some() {
            mask |= Self::HAS_SYMBOLIC_ID;
        }
        if self.namespace_uri.is_some() {
            mask |= Self::HAS_NAMESPACE_URI;
        }
        if self.localized_text.is_some() {
            mask |= Self::HAS_LOCALIZED_TEXT;
        }
        if self.locale.is_some() {
            mask |= Self::HAS_LOCALE;
        }
        if self.additional_info.is_some() {
            mask |= Self::HAS_ADDITIONAL_INFO;
        }
        if self.inner_status_code.is_some() {
            mask |= Self::HAS_INNER_STATUS_CODE;
        }
        if self.inner_diagnostic_info.is_some() {
            mask |= Self::HAS_INNER_DIAGNOSTIC_INFO;
        }
        mask
    }

    /// Number of records in the chain, this one included.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut cur = self.inner_diagnostic_info.as_deref();
        while let Some(inner) = cur {
            depth += 1;
            cur = inner.inner_diagnostic_info.as_deref();
        }
        depth
    }
}

impl DiagnosticInfo {
    /// This record alone, without its nested chain.
    fn copy_record(&self) -> Result<Self> {
        Ok(Self {
            symbolic_id: self.symbolic_id,
            namespace_uri: self.namespace_uri,
            localized_text: self.localized_text,
            locale: self.locale,
            additional_info: self.additional_info.as_ref().map(UaString::try_copy).transpose()?,
            inner_status_code: self.inner_status_code,
            inner_diagnostic_info: None,
        })
    }

    fn same_record(&self, other: &Self) -> bool {
        self.symbolic_id == other.symbolic_id
            && self.namespace_uri == other.namespace_uri
            && self.localized_text == other.localized_text
            && self.locale == other.locale
            && self.additional_info == other.additional_info
            && self.inner_status_code == other.inner_status_code
    }

    fn unlink_chain(&mut self) {
        let mut next = self.inner_diagnostic_info.take();
        while let Some(mut inner) = next {
            next = inner.inner_diagnostic_info.take();
        }
    }
}

impl DataType for DiagnosticInfo {
    const TYPE_INDEX: TypeIndex = types::DIAGNOSTICINFO;

    fn try_copy(&self) -> Result<Self> {
        let mut nested = try_vec(self.depth() - 1)?;
        let mut cur = self.inner_diagnostic_info.as_deref();
        while let Some(info) = cur {
            nested.push(info.copy_record()?);
            cur = info.inner_diagnostic_info.as_deref();
        }

        // Relink innermost first.
        let mut inner = None;
        while let Some(mut record) = nested.pop() {
            record.inner_diagnostic_info = inner;
            inner = Some(try_box(record)?);
        }
        let mut outer = self.copy_record()?;
        outer.inner_diagnostic_info = inner;
        Ok(outer)
    }

    fn delete_members(&mut self) {
        if let Some(info) = self.additional_info.as_mut() {
            info.delete_members();
        }
        self.unlink_chain();
    }
}

impl PartialEq for DiagnosticInfo {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            if !a.same_record(b) {
                return false;
            }
            match (a.inner_diagnostic_info.as_deref(), b.inner_diagnostic_info.as_deref()) {
                (None, None) => return true,
                (Some(x), Some(y)) => (a, b) = (x, y),
                _ => return false,
            }
        }
    }
}

impl Eq for DiagnosticInfo {}

impl Drop for DiagnosticInfo {
    fn drop(&mut self) {
        self.unlink_chain();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: usize) -> DiagnosticInfo {
        let mut info = DiagnosticInfo::default().with_symbolic_id(0);
        for level in 1..len {
            info = DiagnosticInfo::default()
                .with_symbolic_id(level as i32)
                .with_inner_status_code(StatusCode::BAD_INTERNAL_ERROR)
                .with_inner(info);
        }
        info
    }

    #[test]
    fn test_mask_bits() {
        let info = DiagnosticInfo::default()
            .with_locale(3)
            .with_additional_info(UaString::from_static("disk full"));
        assert_eq!(
            info.encoding_mask(),
            DiagnosticInfo::HAS_LOCALE | DiagnosticInfo::HAS_ADDITIONAL_INFO
        );
        assert_eq!(chain(2).encoding_mask() & DiagnosticInfo::HAS_INNER_DIAGNOSTIC_INFO, 0x40);
    }

    #[test]
    fn test_nested_copy_is_independent() {
        let src = chain(4);
        let mut copy = src.try_copy().expect("copy");
        assert_eq!(copy, src);
        assert_eq!(copy.depth(), 4);

        if let Some(inner) = copy.inner_diagnostic_info.as_mut() {
            inner.symbolic_id = Some(-1);
        }
        assert_ne!(copy, src);
        assert_eq!(
            src.inner_diagnostic_info.as_ref().and_then(|i| i.symbolic_id),
            Some(2)
        );
    }

    #[test]
    fn test_chains_of_different_depth_differ() {
        assert_ne!(chain(3), chain(4));
        assert_eq!(chain(3), chain(3));
    }

    #[test]
    fn test_release_unlinks_chain() {
        let mut info = chain(10_000);
        info.delete_members();
        assert_eq!(info.depth(), 1);
        assert!(info.inner_diagnostic_info.is_none());
        assert_eq!(info.symbolic_id, Some(9_999));
    }

    #[test]
    fn test_deep_chain_copy_compare_and_drop() {
        let src = chain(200_000);
        let copy = src.try_copy().expect("copy");
        assert_eq!(copy.depth(), 200_000);
        assert!(copy == src);
        drop(copy);
        drop(src);
    }
}
