// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::builtin::DateTime;
use crate::descriptor::{MemberDescriptor, TypeIndex};
use crate::error::Result;
use crate::ns0::types;
use crate::status::StatusCode;
use crate::value::DataType;
use crate::variant::Variant;
use std::mem::offset_of;

/// A value with optional status and timestamps.
///
/// Each field is independently present. Absent fields are never copied or
/// released.
#[derive(Debug, Default, PartialEq)]
pub struct DataValue {
    pub value: Option<Variant>,
    pub status: Option<StatusCode>,
    pub source_timestamp: Option<DateTime>,
    pub source_picoseconds: Option<i16>,
    pub server_timestamp: Option<DateTime>,
    pub server_picoseconds: Option<i16>,
}

impl DataValue {
    pub const HAS_VALUE: u8 = 0x01;
    pub const HAS_STATUS: u8 = 0x02;
    pub const HAS_SOURCE_TIMESTAMP: u8 = 0x04;
    pub const HAS_SERVER_TIMESTAMP: u8 = 0x08;
    pub const HAS_SOURCE_PICOSECONDS: u8 = 0x10;
    pub const HAS_SERVER_PICOSECONDS: u8 = 0x20;

    pub const MEMBERS: &'static [MemberDescriptor] = &[
        MemberDescriptor::new("value", types::VARIANT, offset_of!(DataValue, value), false),
        MemberDescriptor::new("status", types::STATUSCODE, offset_of!(DataValue, status), false),
        MemberDescriptor::new(
            "source_timestamp",
            types::DATETIME,
            offset_of!(DataValue, source_timestamp),
            false,
        ),
        MemberDescriptor::new(
            "source_picoseconds",
            types::INT16,
            offset_of!(DataValue, source_picoseconds),
            false,
        ),
        MemberDescriptor::new(
            "server_timestamp",
            types::DATETIME,
            offset_of!(DataValue, server_timestamp),
            false,
        ),
        MemberDescriptor::new(
            "server_picoseconds",
            types::INT16,
            offset_of!(DataValue, server_picoseconds),
            false,
        ),
    ];

    #[must_use]
    pub fn with_value(mut self, value: Variant) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_source_timestamp(mut self, ts: DateTime, picoseconds: Option<i16>) -> Self {
        self.source_timestamp = Some(ts);
        self.source_picoseconds = picoseconds;
        self
    }

    #[must_use]
    pub fn with_server_timestamp(mut self, ts: DateTime, picoseconds: Option<i16>) -> Self {
        self.server_timestamp = Some(ts);
        self.server_picoseconds = picoseconds;
        self
    }

    #[must_use]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    #[must_use]
    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    #[must_use]
    pub fn has_source_timestamp(&self) -> bool {
        self.source_timestamp.is_some()
    }

    #[must_use]
    pub fn has_server_timestamp(&self) -> bool {
        self.server_timestamp.is_some()
    }

    #[must_use]
    pub fn has_source_picoseconds(&self) -> bool {
        self.source_picoseconds.is_some()
    }

    #[must_use]
    pub fn has_server_picoseconds(&self) -> bool {
        self.server_picoseconds.is_some()
    }

    /// Presence bits in declaration order, as the codec writes them.
    #[must_use]
    pub fn encoding_mask(&self) -> u8 {
        [
            (self.has_value(), Self::HAS_VALUE),
            (self.has_status(), Self::HAS_STATUS),
            (self.has_source_timestamp(), Self::HAS_SOURCE_TIMESTAMP),
            (self.has_server_timestamp(), Self::HAS_SERVER_TIMESTAMP),
            (self.has_source_picoseconds(), Self::HAS_SOURCE_PICOSECONDS),
            (self.has_server_picoseconds(), Self::HAS_SERVER_PICOSECONDS),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .fold(0, |mask, (_, bit)| mask | bit)
    }
}

impl DataType for DataValue {
    const TYPE_INDEX: TypeIndex = types::DATAVALUE;

    fn try_copy(&self) -> Result<Self> {
        Ok(Self {
            value: self.value.as_ref().map(Variant::try_copy).transpose()?,
            status: self.status,
            source_timestamp: self.source_timestamp,
            source_picoseconds: self.source_picoseconds,
            server_timestamp: self.server_timestamp,
            server_picoseconds: self.server_picoseconds,
        })
    }

    fn delete_members(&mut self) {
        if let Some(value) = self.value.as_mut() {
            value.delete_members();
        }
    }
}
