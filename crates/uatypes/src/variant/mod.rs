// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Polymorphic value container.
//!
//! A [`Variant`] stores its payload in one of three dispositions:
//!
//! - **Data**: owned, copied and released together with the variant
//! - **Borrowed**: shared with an external owner, never released by the variant
//! - **DataSource**: no stored payload, values are pulled from a [`DataSource`]
//!
//! The disposition is an enum arm, so reading the wrong one cannot be
//! expressed.
//!
//! # Example
//!
//! ```
//! use uatypes::{Variant, DataType};
//!
//! let mut v = Variant::new();
//! v.set_array(vec![1.0f64, 2.5, 4.0]).unwrap();
//! assert_eq!(v.array_length(), Some(3));
//!
//! let mut copy = v.try_copy().unwrap();
//! copy.array_mut::<f64>().unwrap()[0] = -1.0;
//! assert_eq!(v.array::<f64>(), Some(&[1.0, 2.5, 4.0][..]));
//! ```

mod datasource;

pub use datasource::{DataSource, SharedDataSource, SourceRead};

use crate::alloc::{try_box, try_vec};
use crate::array::check_footprint;
use crate::builtin::NodeId;
use crate::descriptor::{TypeDescriptor, TypeIndex};
use crate::error::{Error, Result};
use crate::ns0::{self, types};
use crate::value::{ArrayValue, DataType, Value};
use std::fmt;
use std::mem::size_of;
use std::sync::Arc;

/// Owned payload.
#[derive(Debug)]
pub enum Payload {
    Scalar(Box<dyn Value>),
    Array(Box<dyn ArrayValue>),
}

/// Payload shared with an external owner.
#[derive(Debug, Clone)]
pub enum SharedPayload {
    Scalar(Arc<dyn Value>),
    Array(Arc<dyn ArrayValue>),
}

/// Borrowed view of either payload kind.
#[derive(Debug, Clone, Copy)]
pub enum PayloadRef<'a> {
    Scalar(&'a dyn Value),
    Array(&'a dyn ArrayValue),
}

impl PayloadRef<'_> {
    #[must_use]
    pub fn type_index(&self) -> TypeIndex {
        match self {
            Self::Scalar(v) => v.type_index(),
            Self::Array(a) => a.type_index(),
        }
    }

    /// Element count, `-1` for a scalar.
    #[must_use]
    pub fn array_length(&self) -> i32 {
        match self {
            Self::Scalar(_) => -1,
            Self::Array(a) => i32::try_from(a.len()).unwrap_or(i32::MAX),
        }
    }

    fn payload_eq(&self, other: &PayloadRef<'_>) -> bool {
        match (self, other) {
            (Self::Scalar(a), PayloadRef::Scalar(b)) => a.value_eq(*b),
            (Self::Array(a), PayloadRef::Array(b)) => a.array_eq(*b),
            _ => false,
        }
    }

    fn to_owned_payload(self) -> Result<Payload> {
        Ok(match self {
            Self::Scalar(v) => Payload::Scalar(v.copy_boxed()?),
            Self::Array(a) => Payload::Array(a.copy_boxed()?),
        })
    }
}

fn copy_dimensions(dims: Option<&[i32]>) -> Result<Option<Vec<i32>>> {
    match dims {
        None => Ok(None),
        Some(d) => {
            let mut out = try_vec(d.len())?;
            out.extend_from_slice(d);
            Ok(Some(out))
        }
    }
}

fn check_dimensions(dims: &[i32], length: i32) -> Result<()> {
    let product = dims.iter().try_fold(1i64, |acc, &d| {
        if d < 0 {
            None
        } else {
            acc.checked_mul(i64::from(d))
        }
    });
    if product == Some(i64::from(length)) {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "dimensions {:?} do not cover {} elements",
            dims, length
        )))
    }
}

/// Materialized variant content: a payload plus optional array dimensions.
#[derive(Debug, Default)]
pub struct VariantData {
    payload: Option<Payload>,
    array_dimensions: Option<Vec<i32>>,
}

impl VariantData {
    /// No payload.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scalar(value: Box<dyn Value>) -> Self {
        Self {
            payload: Some(Payload::Scalar(value)),
            array_dimensions: None,
        }
    }

    #[must_use]
    pub fn from_array(elements: Box<dyn ArrayValue>) -> Self {
        Self {
            payload: Some(Payload::Array(elements)),
            array_dimensions: None,
        }
    }

    #[must_use]
    pub fn payload(&self) -> Option<PayloadRef<'_>> {
        self.payload.as_ref().map(|p| match p {
            Payload::Scalar(v) => PayloadRef::Scalar(v.as_ref()),
            Payload::Array(a) => PayloadRef::Array(a.as_ref()),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    #[must_use]
    pub fn type_index(&self) -> Option<TypeIndex> {
        self.payload().map(|p| p.type_index())
    }

    /// Element count, `-1` for a scalar or no payload.
    #[must_use]
    pub fn array_length(&self) -> i32 {
        self.payload().map_or(-1, |p| p.array_length())
    }

    #[must_use]
    pub fn array_dimensions(&self) -> Option<&[i32]> {
        self.array_dimensions.as_deref()
    }

    /// Attach dimensions to an array payload. Their product must equal the
    /// element count.
    pub fn set_array_dimensions(&mut self, dims: Vec<i32>) -> Result<()> {
        let length = match self.payload() {
            Some(PayloadRef::Array(a)) => i32::try_from(a.len()).unwrap_or(i32::MAX),
            _ => {
                return Err(Error::InvalidArgument(
                    "dimensions require an array payload".to_string(),
                ))
            }
        };
        check_dimensions(&dims, length)?;
        self.array_dimensions = Some(dims);
        Ok(())
    }

    #[must_use]
    pub fn value<T: DataType>(&self) -> Option<&T> {
        match self.payload()? {
            PayloadRef::Scalar(v) => v.downcast_ref(),
            PayloadRef::Array(_) => None,
        }
    }

    #[must_use]
    pub fn array<T: DataType>(&self) -> Option<&[T]> {
        match self.payload()? {
            PayloadRef::Array(a) => a.as_slice(),
            PayloadRef::Scalar(_) => None,
        }
    }

    /// Deep copy: fresh payload and dimensions.
    pub fn try_copy(&self) -> Result<Self> {
        copy_view(self.payload(), self.array_dimensions())
    }
}

impl PartialEq for VariantData {
    fn eq(&self, other: &Self) -> bool {
        view_eq(
            (self.payload(), self.array_dimensions()),
            (other.payload(), other.array_dimensions()),
        )
    }
}

fn copy_view(payload: Option<PayloadRef<'_>>, dims: Option<&[i32]>) -> Result<VariantData> {
    Ok(VariantData {
        payload: payload.map(PayloadRef::to_owned_payload).transpose()?,
        array_dimensions: copy_dimensions(dims)?,
    })
}

type View<'a> = (Option<PayloadRef<'a>>, Option<&'a [i32]>);

fn view_eq(a: View<'_>, b: View<'_>) -> bool {
    let payload_eq = match (a.0, b.0) {
        (None, None) => true,
        (Some(x), Some(y)) => x.payload_eq(&y),
        _ => false,
    };
    payload_eq && a.1 == b.1
}

/// Content shared with an external owner.
#[derive(Debug, Clone)]
pub struct BorrowedData {
    payload: SharedPayload,
    array_dimensions: Option<Vec<i32>>,
}

impl BorrowedData {
    #[must_use]
    pub fn payload(&self) -> PayloadRef<'_> {
        match &self.payload {
            SharedPayload::Scalar(v) => PayloadRef::Scalar(v.as_ref()),
            SharedPayload::Array(a) => PayloadRef::Array(a.as_ref()),
        }
    }
}

/// Holds a data source and tears it down exactly once.
pub struct SourceSlot(Box<dyn DataSource>);

impl Drop for SourceSlot {
    fn drop(&mut self) {
        self.0.delete();
    }
}

impl fmt::Debug for SourceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DataSource")
    }
}

/// The three storage dispositions.
#[derive(Debug)]
pub enum VariantStorage {
    Data(VariantData),
    Borrowed(BorrowedData),
    DataSource(SourceSlot),
}

impl Default for VariantStorage {
    fn default() -> Self {
        Self::Data(VariantData::default())
    }
}

/// Scalar, array or live value of any registered type.
#[derive(Debug, Default)]
pub struct Variant {
    type_index: Option<TypeIndex>,
    storage: VariantStorage,
}

impl Variant {
    /// Empty variant (owned disposition, no payload).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned scalar moved into a fresh box.
    pub fn from_value<T: DataType>(value: T) -> Result<Self> {
        let mut v = Self::new();
        v.set_value(try_box(value)?);
        Ok(v)
    }

    fn install(&mut self, type_index: TypeIndex, storage: VariantStorage) {
        // Dropping the previous storage releases owned data and tears down a
        // previous data source.
        self.storage = storage;
        self.type_index = Some(type_index);
    }

    // ---------------------------------------------------------------------
    // Owned
    // ---------------------------------------------------------------------

    /// Take ownership of a scalar.
    pub fn set_value<T: DataType>(&mut self, value: Box<T>) {
        self.install(T::TYPE_INDEX, VariantStorage::Data(VariantData::scalar(value)));
    }

    /// Take ownership of an erased scalar, which must be of `type_index`.
    pub fn set_boxed(&mut self, value: Box<dyn Value>, type_index: TypeIndex) -> Result<()> {
        if value.type_index() != type_index {
            return Err(Error::TypeMismatch {
                expected: type_index,
                got: value.type_index(),
            });
        }
        self.install(type_index, VariantStorage::Data(VariantData::scalar(value)));
        Ok(())
    }

    /// Take ownership of an array.
    pub fn set_array<T: DataType>(&mut self, elements: Vec<T>) -> Result<()> {
        check_footprint(elements.len(), size_of::<T>())?;
        let boxed: Box<dyn ArrayValue> = try_box(elements)?;
        self.install(T::TYPE_INDEX, VariantStorage::Data(VariantData::from_array(boxed)));
        Ok(())
    }

    /// Take ownership of an erased array of `type_index` elements.
    pub fn set_array_boxed(&mut self, elements: Box<dyn ArrayValue>, type_index: TypeIndex) -> Result<()> {
        if elements.type_index() != type_index {
            return Err(Error::TypeMismatch {
                expected: type_index,
                got: elements.type_index(),
            });
        }
        check_footprint(elements.len(), elements.element_size())?;
        self.install(type_index, VariantStorage::Data(VariantData::from_array(elements)));
        Ok(())
    }

    /// Own a deep copy of `value`.
    pub fn copy_set_value<T: DataType>(&mut self, value: &T) -> Result<()> {
        let copy = try_box(value.try_copy()?)?;
        self.set_value(copy);
        Ok(())
    }

    /// Own a deep copy of `elements`.
    pub fn copy_set_array<T: DataType>(&mut self, elements: &[T]) -> Result<()> {
        self.set_array(crate::array::copy_slice(elements)?)
    }

    /// Replace the content with already materialized data.
    ///
    /// An empty `data` resets the variant.
    pub fn set_data(&mut self, data: VariantData) {
        match data.type_index() {
            Some(index) => self.install(index, VariantStorage::Data(data)),
            None => self.delete_members(),
        }
    }

    // ---------------------------------------------------------------------
    // Borrowed
    // ---------------------------------------------------------------------

    /// Reference a scalar owned elsewhere. The variant never releases it.
    pub fn set_borrowed_value(&mut self, value: Arc<dyn Value>) {
        let index = value.type_index();
        self.install(
            index,
            VariantStorage::Borrowed(BorrowedData {
                payload: SharedPayload::Scalar(value),
                array_dimensions: None,
            }),
        );
    }

    /// Reference an array owned elsewhere. The variant never releases it.
    pub fn set_borrowed_array(&mut self, elements: Arc<dyn ArrayValue>) {
        let index = elements.type_index();
        self.install(
            index,
            VariantStorage::Borrowed(BorrowedData {
                payload: SharedPayload::Array(elements),
                array_dimensions: None,
            }),
        );
    }

    // ---------------------------------------------------------------------
    // DataSource
    // ---------------------------------------------------------------------

    /// Serve values of `type_index` from `source`.
    ///
    /// The source is torn down (via [`DataSource::delete`]) when the variant
    /// is released or its storage replaced.
    pub fn set_data_source(&mut self, type_index: TypeIndex, source: Box<dyn DataSource>) {
        log::debug!("[variant] data source installed for type {}", type_index);
        self.install(type_index, VariantStorage::DataSource(SourceSlot(source)));
    }

    /// Read a snapshot from the data source.
    ///
    /// The snapshot is released back to the source when the guard drops.
    pub fn read_source(&self) -> Result<SourceRead<'_>> {
        match &self.storage {
            VariantStorage::DataSource(slot) => SourceRead::new(slot.0.as_ref()),
            _ => Err(Error::NotSupported("variant has no data source")),
        }
    }

    /// Push a new value into the data source.
    pub fn write_source(&self, data: VariantData) -> Result<()> {
        match &self.storage {
            VariantStorage::DataSource(slot) => slot.0.write(data),
            _ => Err(Error::NotSupported("variant has no data source")),
        }
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn storage(&self) -> &VariantStorage {
        &self.storage
    }

    /// Logical type of the payload, `None` when empty.
    #[must_use]
    pub fn type_index(&self) -> Option<TypeIndex> {
        self.type_index
    }

    #[must_use]
    pub fn descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.type_index.and_then(ns0::descriptor)
    }

    /// Namespace-zero type NodeId of the payload.
    #[must_use]
    pub fn type_id(&self) -> Option<NodeId> {
        self.descriptor().and_then(TypeDescriptor::node_id)
    }

    /// Owned disposition with no payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(&self.storage, VariantStorage::Data(d) if d.is_empty())
    }

    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.storage, VariantStorage::Borrowed(_))
    }

    #[must_use]
    pub fn is_data_source(&self) -> bool {
        matches!(self.storage, VariantStorage::DataSource(_))
    }

    /// Stored payload and dimensions; `None` for the data-source disposition.
    fn view(&self) -> Option<View<'_>> {
        match &self.storage {
            VariantStorage::Data(d) => Some((d.payload(), d.array_dimensions())),
            VariantStorage::Borrowed(b) => Some((Some(b.payload()), b.array_dimensions.as_deref())),
            VariantStorage::DataSource(_) => None,
        }
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self.view(), Some((Some(PayloadRef::Scalar(_)), _)))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.view(), Some((Some(PayloadRef::Array(_)), _)))
    }

    /// Element count (`-1` for a scalar or no payload); `None` for a data
    /// source, whose content is only known after a read.
    #[must_use]
    pub fn array_length(&self) -> Option<i32> {
        self.view()
            .map(|(payload, _)| payload.map_or(-1, |p| p.array_length()))
    }

    #[must_use]
    pub fn array_dimensions(&self) -> Option<&[i32]> {
        self.view().and_then(|(_, dims)| dims)
    }

    /// Attach dimensions to a stored array.
    pub fn set_array_dimensions(&mut self, dims: Vec<i32>) -> Result<()> {
        match &mut self.storage {
            VariantStorage::Data(d) => d.set_array_dimensions(dims),
            VariantStorage::Borrowed(b) => {
                let length = match b.payload() {
                    PayloadRef::Array(a) => i32::try_from(a.len()).unwrap_or(i32::MAX),
                    PayloadRef::Scalar(_) => {
                        return Err(Error::InvalidArgument(
                            "dimensions require an array payload".to_string(),
                        ))
                    }
                };
                check_dimensions(&dims, length)?;
                b.array_dimensions = Some(dims);
                Ok(())
            }
            VariantStorage::DataSource(_) => {
                Err(Error::NotSupported("dimensions of a data source variant"))
            }
        }
    }

    /// Stored scalar of type `T` (owned or borrowed).
    #[must_use]
    pub fn value<T: DataType>(&self) -> Option<&T> {
        match self.view()?.0? {
            PayloadRef::Scalar(v) => v.downcast_ref(),
            PayloadRef::Array(_) => None,
        }
    }

    /// Stored array of `T` (owned or borrowed).
    #[must_use]
    pub fn array<T: DataType>(&self) -> Option<&[T]> {
        match self.view()?.0? {
            PayloadRef::Array(a) => a.as_slice(),
            PayloadRef::Scalar(_) => None,
        }
    }

    /// Mutable owned scalar. Borrowed payloads are read-only.
    pub fn value_mut<T: DataType>(&mut self) -> Option<&mut T> {
        match &mut self.storage {
            VariantStorage::Data(VariantData {
                payload: Some(Payload::Scalar(v)),
                ..
            }) => v.downcast_mut(),
            _ => None,
        }
    }

    /// Mutable owned array. Borrowed payloads are read-only.
    pub fn array_mut<T: DataType>(&mut self) -> Option<&mut [T]> {
        match &mut self.storage {
            VariantStorage::Data(VariantData {
                payload: Some(Payload::Array(a)),
                ..
            }) => a.as_mut_slice(),
            _ => None,
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        if self.type_index != other.type_index {
            return false;
        }
        match (self.view(), other.view()) {
            (Some(a), Some(b)) => view_eq(a, b),
            (None, None) => match (&self.storage, &other.storage) {
                (VariantStorage::DataSource(a), VariantStorage::DataSource(b)) => {
                    std::ptr::addr_eq(a.0.as_ref(), b.0.as_ref())
                }
                _ => false,
            },
            _ => false,
        }
    }
}

impl DataType for Variant {
    const TYPE_INDEX: TypeIndex = types::VARIANT;

    /// Owned and borrowed variants copy into an owned, independent variant.
    /// A data-source variant cannot be duplicated.
    fn try_copy(&self) -> Result<Self> {
        let Some((payload, dims)) = self.view() else {
            log::debug!("[variant] copy of data source variant rejected");
            return Err(Error::NotSupported("copy of a data source variant"));
        };
        Ok(Self {
            type_index: self.type_index,
            storage: VariantStorage::Data(copy_view(payload, dims)?),
        })
    }

    /// Back to an empty owned variant. Borrowed content is left to its
    /// owner; a data source is torn down.
    fn delete_members(&mut self) {
        self.storage = VariantStorage::default();
        self.type_index = None;
    }
}
