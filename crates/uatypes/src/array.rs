// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounded homogeneous arrays.
//!
//! Counts are signed on the wire (`-1` = null array). Every allocation is
//! checked against the configured footprint bound
//! ([`MAX_ARRAY_SIZE`](crate::config::MAX_ARRAY_SIZE) by default) before any
//! memory is requested.

use crate::alloc::{try_box, try_vec};
use crate::config;
use crate::descriptor::{TypeDescriptor, TypeIndex};
use crate::error::{Error, Result};
use crate::registry::registry;
use crate::value::{ArrayValue, DataType, Member};
use std::mem::size_of;

/// Validate `count` elements of `elem_size` bytes against the footprint bound.
fn checked_count(count: i32, elem_size: usize) -> Result<usize> {
    let n = usize::try_from(count)
        .map_err(|_| Error::InvalidArgument(format!("negative array length {}", count)))?;
    check_footprint(n, elem_size)?;
    Ok(n)
}

/// Reject `count` elements of `elem_size` bytes above the footprint bound.
pub(crate) fn check_footprint(count: usize, elem_size: usize) -> Result<()> {
    let limit = config::runtime().max_array_bytes;
    match count.checked_mul(elem_size) {
        Some(bytes) if bytes <= limit => Ok(()),
        _ => {
            log::debug!(
                "[array] rejected {} x {} bytes (limit {})",
                count,
                elem_size,
                limit
            );
            Err(Error::InvalidArgument(format!(
                "array of {} elements x {} bytes exceeds {} byte limit",
                count, elem_size, limit
            )))
        }
    }
}

/// `count` independently initialized elements.
pub fn new_vec<T: DataType>(count: usize) -> Result<Vec<T>> {
    check_footprint(count, size_of::<T>())?;
    let mut out = try_vec(count)?;
    out.resize_with(count, T::default);
    Ok(out)
}

/// Deep copy of every element.
///
/// If element `k` fails to copy, elements `0..k` are released together with
/// the block and the error is returned.
pub fn copy_slice<T: DataType>(src: &[T]) -> Result<Vec<T>> {
    check_footprint(src.len(), size_of::<T>())?;
    let mut out = try_vec(src.len())?;
    for (k, item) in src.iter().enumerate() {
        match item.try_copy() {
            Ok(copy) => out.push(copy),
            Err(err) => {
                log::debug!(
                    "[array] copy failed at element {} of {}: {}",
                    k,
                    src.len(),
                    err
                );
                return Err(err);
            }
        }
    }
    Ok(out)
}

/// Allocate `count` initialized elements of the described type.
///
/// Negative counts and footprints over the bound yield
/// [`Error::InvalidArgument`]. `count == 0` yields a valid empty array.
pub fn array_new(count: i32, descriptor: &TypeDescriptor) -> Result<Box<dyn ArrayValue>> {
    let n = checked_count(count, descriptor.mem_size)?;
    registry().handler_for(descriptor)?.new_array(n)
}

/// Deep copy of an erased array of the described type.
pub fn array_copy(src: &dyn ArrayValue, descriptor: &TypeDescriptor) -> Result<Box<dyn ArrayValue>> {
    if src.type_index() != descriptor.type_index {
        return Err(Error::TypeMismatch {
            expected: descriptor.type_index,
            got: src.type_index(),
        });
    }
    registry().handler_for(descriptor)?.copy_array(src)
}

/// Release every element, then the block. `None` is a no-op.
pub fn array_delete(array: Option<Box<dyn ArrayValue>>, descriptor: &TypeDescriptor) {
    let Some(array) = array else {
        return;
    };
    if array.type_index() != descriptor.type_index {
        log::warn!(
            "[array] delete of {} array through {} descriptor",
            array.type_index(),
            descriptor.name
        );
    }
    drop(array);
}

/// An array member of a structured type.
///
/// Distinguishes the null array (`len() == -1`) from the empty one.
#[derive(Debug, Clone, PartialEq)]
pub struct UaArray<T>(Option<Vec<T>>);

impl<T> Default for UaArray<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T: DataType> UaArray<T> {
    #[must_use]
    pub const fn null() -> Self {
        Self(None)
    }

    /// Take ownership of existing elements, within the footprint bound.
    pub fn from_vec(elements: Vec<T>) -> Result<Self> {
        check_footprint(elements.len(), size_of::<T>())?;
        Ok(Self(Some(elements)))
    }

    /// `count` initialized elements (`-1` gives the null array).
    pub fn new(count: i32) -> Result<Self> {
        if count == -1 {
            return Ok(Self::null());
        }
        let n = checked_count(count, size_of::<T>())?;
        Ok(Self(Some(new_vec(n)?)))
    }

    /// Element count, `-1` when null.
    #[must_use]
    pub fn len(&self) -> i32 {
        self.0
            .as_ref()
            .map_or(-1, |v| i32::try_from(v.len()).unwrap_or(i32::MAX))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Present with zero elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.as_ref().is_some_and(Vec::is_empty)
    }

    #[must_use]
    pub fn as_slice(&self) -> Option<&[T]> {
        self.0.as_deref()
    }

    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        self.0.as_deref_mut()
    }

    #[must_use]
    pub fn into_vec(self) -> Option<Vec<T>> {
        self.0
    }

    pub fn try_copy(&self) -> Result<Self> {
        match &self.0 {
            None => Ok(Self::null()),
            Some(elements) => Ok(Self(Some(copy_slice(elements)?))),
        }
    }

    /// Erase into a boxed array, or `None` when null.
    pub fn into_boxed(self) -> Result<Option<Box<dyn ArrayValue>>> {
        match self.0 {
            None => Ok(None),
            Some(elements) => Ok(Some(try_box(elements)?)),
        }
    }
}

impl<T: DataType> Member for UaArray<T> {
    const MEMBER_TYPE_INDEX: TypeIndex = T::TYPE_INDEX;
    const IS_ARRAY: bool = true;

    fn copy_member(&self) -> Result<Self> {
        self.try_copy()
    }

    fn release_member(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::UaString;
    use crate::config::MAX_ARRAY_SIZE;
    use crate::ns0::{self, types};

    fn desc(index: TypeIndex) -> &'static TypeDescriptor {
        ns0::descriptor(index).expect("ns0 descriptor")
    }

    #[test]
    fn test_array_new_initializes_elements() {
        let arr = array_new(4, desc(types::STRING)).expect("array");
        assert_eq!(arr.len(), 4);
        let strings = arr.as_slice::<UaString>().expect("strings");
        assert!(strings.iter().all(UaString::is_null));
    }

    #[test]
    fn test_array_new_zero_is_valid() {
        let arr = array_new(0, desc(types::DOUBLE)).expect("empty");
        assert!(arr.is_empty());
        array_delete(Some(arr), desc(types::DOUBLE));
    }

    #[test]
    fn test_array_new_rejects_negative() {
        let err = array_new(-1, desc(types::INT32)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_array_new_rejects_oversized_footprint() {
        let count = (MAX_ARRAY_SIZE / 8 + 1) as i32;
        let err = array_new(count, desc(types::INT64)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let big: Result<Vec<u64>> = new_vec(MAX_ARRAY_SIZE);
        assert!(big.is_err());
    }

    #[test]
    fn test_array_copy_is_independent() {
        let src: Box<dyn ArrayValue> = Box::new(vec![
            UaString::copy_cstring("a").expect("a"),
            UaString::null(),
            UaString::empty(),
        ]);
        let mut copy = array_copy(src.as_ref(), desc(types::STRING)).expect("copy");
        assert!(copy.array_eq(src.as_ref()));

        copy.as_mut_slice::<UaString>().expect("strings")[0] =
            UaString::copy_cstring("b").expect("b");
        assert_eq!(
            src.as_slice::<UaString>().expect("strings")[0].as_bytes(),
            Some(&b"a"[..])
        );
    }

    #[test]
    fn test_array_copy_type_mismatch() {
        let src: Box<dyn ArrayValue> = Box::new(vec![1u8, 2]);
        let err = array_copy(src.as_ref(), desc(types::INT16)).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: types::INT16,
                got: types::BYTE
            }
        );
    }

    #[test]
    fn test_array_delete_none_is_noop() {
        array_delete(None, desc(types::BYTE));
    }

    #[test]
    fn test_ua_array_null_and_empty() {
        let null: UaArray<u32> = UaArray::null();
        let empty: UaArray<u32> = UaArray::new(0).expect("empty");
        assert_eq!(null.len(), -1);
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
        assert_ne!(null, empty);

        let copy = empty.try_copy().expect("copy");
        assert_eq!(copy, empty);
        assert!(UaArray::<u32>::new(-1).expect("null").is_null());
        assert!(UaArray::<u32>::new(-2).is_err());
    }
}
