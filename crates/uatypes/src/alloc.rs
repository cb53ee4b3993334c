// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fallible allocation helpers.
//!
//! The global allocator aborts on failure when reached through `Box::new` or
//! `Vec::push`. Everything sized by the caller goes through these helpers
//! instead so exhaustion surfaces as [`Error::OutOfMemory`].

use crate::error::{Error, Result};
use std::alloc::{alloc, Layout};

/// Move `value` into a fresh heap allocation, or report exhaustion.
pub fn try_box<T>(value: T) -> Result<Box<T>> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new(value));
    }
    // SAFETY: layout has non-zero size.
    let ptr = unsafe { alloc(layout) }.cast::<T>();
    if ptr.is_null() {
        log::debug!("[alloc] {} byte instance allocation failed", layout.size());
        return Err(Error::OutOfMemory);
    }
    // SAFETY: ptr is non-null, aligned and sized for T, and was obtained from
    // the global allocator with T's layout, which is exactly what Box expects.
    unsafe {
        ptr.write(value);
        Ok(Box::from_raw(ptr))
    }
}

/// Empty vector with room for exactly `capacity` elements.
pub fn try_vec<T>(capacity: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(capacity)?;
    Ok(out)
}

/// Owned copy of a byte slice.
pub fn try_copy_bytes(src: &[u8]) -> Result<Vec<u8>> {
    let mut out = try_vec(src.len())?;
    out.extend_from_slice(src);
    Ok(out)
}
