// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor-parameterized lifecycle.
//!
//! Each operation resolves the descriptor's handler in the namespace-zero
//! [`registry`] and runs the type's own lifecycle on the erased instance.
//! Release paths never fail: a descriptor that does not resolve is logged
//! and ignored.
//!
//! ```
//! use uatypes::{generic, ns0::{self, types}, QualifiedName};
//!
//! let desc = ns0::descriptor(types::QUALIFIEDNAME).unwrap();
//! let src = generic::new(desc).unwrap();
//! let mut dst = generic::new(desc).unwrap();
//! generic::copy(src.as_ref(), dst.as_mut(), desc).unwrap();
//! assert_eq!(dst.downcast_ref::<QualifiedName>(), Some(&QualifiedName::default()));
//! generic::delete(dst, desc);
//! ```

use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::registry::registry;
use crate::value::Value;

/// Allocate and initialize an instance of the described type.
pub fn new(descriptor: &TypeDescriptor) -> Result<Box<dyn Value>> {
    registry().handler_for(descriptor)?.new_value()
}

/// Reset `value` to its initialized state. Never allocates.
pub fn init(value: &mut dyn Value, descriptor: &TypeDescriptor) {
    match registry().handler_for(descriptor) {
        Ok(handler) => handler.init(value),
        Err(err) => log::warn!("[generic] init via {}: {}", descriptor.name, err),
    }
}

/// Deep copy `src` into `dst`.
///
/// On failure `dst` is release-safe but its content is unspecified.
pub fn copy(src: &dyn Value, dst: &mut dyn Value, descriptor: &TypeDescriptor) -> Result<()> {
    registry().handler_for(descriptor)?.copy_into(src, dst)
}

/// Release the dynamically owned members of `value`.
pub fn delete_members(value: &mut dyn Value, descriptor: &TypeDescriptor) {
    match registry().handler_for(descriptor) {
        Ok(handler) => handler.delete_members(value),
        Err(err) => log::warn!("[generic] release via {}: {}", descriptor.name, err),
    }
}

/// Release members, then the instance itself.
pub fn delete(mut value: Box<dyn Value>, descriptor: &TypeDescriptor) {
    delete_members(value.as_mut(), descriptor);
}
