// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: one lifecycle handler per descriptor.
//!
//! The catalogue is closed: every type index of a table maps to a boxed
//! [`TypeHandler`] built from the Rust type registered for it. Dispatch by
//! descriptor goes through [`TypeRegistry::handler_for`], which also checks
//! the descriptor really belongs to the registry's table.

use crate::alloc::try_box;
use crate::array::{copy_slice, new_vec};
use crate::builtin::{
    ByteString, DateTime, ExpandedNodeId, Guid, LocalizedText, NodeId, QualifiedName, UaString,
    XmlElement,
};
use crate::composite::{DataValue, DiagnosticInfo, ExtensionObject};
use crate::descriptor::{DescriptorTable, TypeDescriptor, TypeIndex};
use crate::error::{Error, Result};
use crate::generated::{Argument, ReadValueId};
use crate::ns0;
use crate::status::StatusCode;
use crate::value::{ArrayValue, DataType, Value};
use crate::variant::Variant;
use std::marker::PhantomData;
use std::sync::OnceLock;

/// Lifecycle operations for one type, over erased instances.
pub trait TypeHandler: Send + Sync {
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Heap-allocated initialized instance.
    fn new_value(&self) -> Result<Box<dyn Value>>;

    /// Reset to the initialized state.
    fn init(&self, value: &mut dyn Value);

    /// Deep copy into a fresh instance.
    fn copy(&self, src: &dyn Value) -> Result<Box<dyn Value>>;

    /// Deep copy into `dst`, leaving it release-safe on failure.
    fn copy_into(&self, src: &dyn Value, dst: &mut dyn Value) -> Result<()>;

    /// Release owned members. Never fails.
    fn delete_members(&self, value: &mut dyn Value);

    /// `count` initialized elements. The caller has checked the bound.
    fn new_array(&self, count: usize) -> Result<Box<dyn ArrayValue>>;

    /// Element-wise deep copy.
    fn copy_array(&self, src: &dyn ArrayValue) -> Result<Box<dyn ArrayValue>>;
}

struct Handler<T>(PhantomData<fn() -> T>);

impl<T: DataType> Handler<T> {
    fn new() -> Self {
        Self(PhantomData)
    }

    fn mismatch(got: TypeIndex) -> Error {
        Error::TypeMismatch {
            expected: T::TYPE_INDEX,
            got,
        }
    }
}

impl<T: DataType> TypeHandler for Handler<T> {
    fn descriptor(&self) -> &'static TypeDescriptor {
        T::descriptor()
    }

    fn new_value(&self) -> Result<Box<dyn Value>> {
        Ok(T::new_boxed()?)
    }

    fn init(&self, value: &mut dyn Value) {
        let got = value.type_index();
        match value.downcast_mut::<T>() {
            Some(v) => v.init(),
            None => log::warn!(
                "[registry] init of type {} through {} handler ignored",
                got,
                T::descriptor().name
            ),
        }
    }

    fn copy(&self, src: &dyn Value) -> Result<Box<dyn Value>> {
        let src = src
            .downcast_ref::<T>()
            .ok_or_else(|| Self::mismatch(src.type_index()))?;
        Ok(try_box(src.try_copy()?)?)
    }

    fn copy_into(&self, src: &dyn Value, dst: &mut dyn Value) -> Result<()> {
        let src = src
            .downcast_ref::<T>()
            .ok_or_else(|| Self::mismatch(src.type_index()))?;
        let got = dst.type_index();
        let dst = dst
            .downcast_mut::<T>()
            .ok_or_else(|| Self::mismatch(got))?;
        src.copy_into(dst)
    }

    fn delete_members(&self, value: &mut dyn Value) {
        if T::descriptor().is_pointer_free() {
            return;
        }
        let got = value.type_index();
        match value.downcast_mut::<T>() {
            Some(v) => v.delete_members(),
            None => log::warn!(
                "[registry] release of type {} through {} handler ignored",
                got,
                T::descriptor().name
            ),
        }
    }

    fn new_array(&self, count: usize) -> Result<Box<dyn ArrayValue>> {
        Ok(try_box(new_vec::<T>(count)?)?)
    }

    fn copy_array(&self, src: &dyn ArrayValue) -> Result<Box<dyn ArrayValue>> {
        let elements = src
            .as_slice::<T>()
            .ok_or_else(|| Self::mismatch(src.type_index()))?;
        Ok(try_box(copy_slice(elements)?)?)
    }
}

/// Handlers indexed by type index, for one descriptor table.
pub struct TypeRegistry {
    table: DescriptorTable,
    handlers: Vec<Option<Box<dyn TypeHandler>>>,
}

impl TypeRegistry {
    /// Empty registry over `table`.
    #[must_use]
    pub fn new(table: DescriptorTable) -> Self {
        Self {
            table,
            handlers: (0..table.len()).map(|_| None).collect(),
        }
    }

    /// Registry with every namespace-zero type.
    #[must_use]
    pub fn ns0() -> Self {
        let mut reg = Self::new(ns0::table());
        reg.insert::<bool>();
        reg.insert::<i8>();
        reg.insert::<u8>();
        reg.insert::<i16>();
        reg.insert::<u16>();
        reg.insert::<i32>();
        reg.insert::<u32>();
        reg.insert::<i64>();
        reg.insert::<u64>();
        reg.insert::<f32>();
        reg.insert::<f64>();
        reg.insert::<UaString>();
        reg.insert::<DateTime>();
        reg.insert::<Guid>();
        reg.insert::<ByteString>();
        reg.insert::<XmlElement>();
        reg.insert::<NodeId>();
        reg.insert::<ExpandedNodeId>();
        reg.insert::<StatusCode>();
        reg.insert::<QualifiedName>();
        reg.insert::<LocalizedText>();
        reg.insert::<ExtensionObject>();
        reg.insert::<DataValue>();
        reg.insert::<Variant>();
        reg.insert::<DiagnosticInfo>();
        reg.insert::<Argument>();
        reg.insert::<ReadValueId>();
        reg
    }

    /// Register `T` under its type index.
    ///
    /// `T::descriptor()` must be the table entry at that index.
    pub fn register<T: DataType>(&mut self) -> Result<()> {
        let expected = self
            .table
            .get(T::TYPE_INDEX)
            .ok_or(Error::UnknownType(T::TYPE_INDEX))?;
        if !std::ptr::eq(expected, T::descriptor()) {
            return Err(Error::InvalidArgument(format!(
                "{} is not the descriptor at index {}",
                T::descriptor().name,
                T::TYPE_INDEX
            )));
        }
        self.insert::<T>();
        Ok(())
    }

    fn insert<T: DataType>(&mut self) {
        if let Some(slot) = self.handlers.get_mut(usize::from(T::TYPE_INDEX)) {
            *slot = Some(Box::new(Handler::<T>::new()));
        }
    }

    #[must_use]
    pub fn table(&self) -> DescriptorTable {
        self.table
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.iter().filter(|h| h.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handler registered at `index`.
    pub fn handler(&self, index: TypeIndex) -> Result<&dyn TypeHandler> {
        self.handlers
            .get(usize::from(index))
            .and_then(Option::as_deref)
            .ok_or(Error::UnknownType(index))
    }

    /// Handler for `descriptor`, which must come from this registry's table.
    pub fn handler_for(&self, descriptor: &TypeDescriptor) -> Result<&dyn TypeHandler> {
        let handler = self.handler(descriptor.type_index)?;
        let own = handler.descriptor();
        if std::ptr::eq(own, descriptor) || own == descriptor {
            Ok(handler)
        } else {
            Err(Error::UnknownType(descriptor.type_index))
        }
    }

    /// Registered handlers in index order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn TypeHandler> {
        self.handlers.iter().filter_map(Option::as_deref)
    }
}

/// The process-wide namespace-zero registry, built on first use.
pub fn registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let reg = TypeRegistry::ns0();
        log::debug!("[registry] {} types registered", reg.len());
        reg
    })
}
