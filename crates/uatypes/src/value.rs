// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lifecycle contract shared by every registered type.
//!
//! [`DataType`] is the typed surface (`new`/`init`/`copy`/`deleteMembers`/
//! `delete`). [`Value`] and [`ArrayValue`] are its type-erased faces, used
//! wherever only a [`TypeIndex`] is known at runtime (variants, the generic
//! engine, the array engine).

use crate::alloc::try_box;
use crate::descriptor::{TypeDescriptor, TypeIndex};
use crate::error::Result;
use crate::ns0;
use std::any::Any;
use std::fmt;

/// A type with a descriptor and explicit lifecycle operations.
///
/// `Default` is the initialized ("safe zero") state: scalars zero/false,
/// strings and arrays null.
pub trait DataType: Any + fmt::Debug + Default + PartialEq + Send + Sync {
    /// Position of the type's descriptor in its table.
    const TYPE_INDEX: TypeIndex;

    /// Descriptor of this type.
    ///
    /// Types outside namespace zero must override this.
    fn descriptor() -> &'static TypeDescriptor {
        &ns0::NS0_TYPES[usize::from(Self::TYPE_INDEX)]
    }

    /// Heap-allocate an initialized instance.
    fn new_boxed() -> Result<Box<Self>> {
        try_box(Self::default())
    }

    /// Reset to the initialized state. Never allocates.
    fn init(&mut self) {
        *self = Self::default();
    }

    /// Deep copy. Every owned member of the result is a fresh allocation.
    fn try_copy(&self) -> Result<Self>;

    /// Deep copy into `dst`.
    ///
    /// On failure `dst` is reduced to a release-safe state and the error is
    /// returned; its content is then unspecified.
    fn copy_into(&self, dst: &mut Self) -> Result<()> {
        match self.try_copy() {
            Ok(copy) => {
                *dst = copy;
                Ok(())
            }
            Err(err) => {
                dst.delete_members();
                Err(err)
            }
        }
    }

    /// Release dynamically owned members only. Never fails.
    ///
    /// Inline scalar members keep their value; call [`init`](Self::init)
    /// before reusing the instance.
    fn delete_members(&mut self);

    /// Release members and the instance allocation.
    fn delete(mut self: Box<Self>) {
        self.delete_members();
    }
}

/// Type-erased view of a single [`DataType`] instance.
pub trait Value: Any + fmt::Debug + Send + Sync {
    fn type_index(&self) -> TypeIndex;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Deep copy into a fresh box.
    fn copy_boxed(&self) -> Result<Box<dyn Value>>;
    /// Structural equality against a value of any type.
    fn value_eq(&self, other: &dyn Value) -> bool;
}

impl<T: DataType> Value for T {
    fn type_index(&self) -> TypeIndex {
        T::TYPE_INDEX
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn copy_boxed(&self) -> Result<Box<dyn Value>> {
        Ok(try_box(self.try_copy()?)?)
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }
}

impl dyn Value {
    #[must_use]
    pub fn downcast_ref<T: DataType>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: DataType>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

/// Type-erased view of a homogeneous array of [`DataType`] elements.
pub trait ArrayValue: Any + fmt::Debug + Send + Sync {
    /// Element type.
    fn type_index(&self) -> TypeIndex;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn element(&self, index: usize) -> Option<&dyn Value>;
    /// In-memory size of one element.
    fn element_size(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Deep copy of every element into a fresh array.
    fn copy_boxed(&self) -> Result<Box<dyn ArrayValue>>;
    fn array_eq(&self, other: &dyn ArrayValue) -> bool;
}

impl<T: DataType> ArrayValue for Vec<T> {
    fn type_index(&self) -> TypeIndex {
        T::TYPE_INDEX
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn element(&self, index: usize) -> Option<&dyn Value> {
        self.get(index).map(|v| v as &dyn Value)
    }

    fn element_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn copy_boxed(&self) -> Result<Box<dyn ArrayValue>> {
        Ok(try_box(crate::array::copy_slice(self)?)?)
    }

    fn array_eq(&self, other: &dyn ArrayValue) -> bool {
        other.as_any().downcast_ref::<Vec<T>>() == Some(self)
    }
}

impl dyn ArrayValue {
    #[must_use]
    pub fn as_slice<T: DataType>(&self) -> Option<&[T]> {
        self.as_any().downcast_ref::<Vec<T>>().map(Vec::as_slice)
    }

    pub fn as_mut_slice<T: DataType>(&mut self) -> Option<&mut [T]> {
        self.as_any_mut()
            .downcast_mut::<Vec<T>>()
            .map(Vec::as_mut_slice)
    }
}

/// A field of a structured type: either an inline [`DataType`] or an array
/// of one.
pub trait Member: Sized {
    const MEMBER_TYPE_INDEX: TypeIndex;
    const IS_ARRAY: bool;

    fn copy_member(&self) -> Result<Self>;
    fn release_member(&mut self);
}

impl<T: DataType> Member for T {
    const MEMBER_TYPE_INDEX: TypeIndex = T::TYPE_INDEX;
    const IS_ARRAY: bool = false;

    fn copy_member(&self) -> Result<Self> {
        self.try_copy()
    }

    fn release_member(&mut self) {
        self.delete_members();
    }
}
