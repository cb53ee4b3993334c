// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Composite builtins with presence-gated or tagged fields.
//!
//! Their members are not all [`Member`](crate::value::Member) fields (optional
//! fields, encoding tags), so their lifecycle is written by hand while their
//! member tables are still published for the external codec.

mod data_value;
mod diagnostic_info;
mod extension_object;

pub use data_value::DataValue;
pub use diagnostic_info::DiagnosticInfo;
pub use extension_object::{ExtensionObject, ExtensionObjectEncoding};
