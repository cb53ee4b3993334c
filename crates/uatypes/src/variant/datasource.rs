// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Live value providers.

use super::VariantData;
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Supplies a variant's value on demand instead of storing it.
///
/// Every successful [`read`](Self::read) is paired with exactly one
/// [`release`](Self::release) of the same snapshot; [`SourceRead`] does the
/// pairing automatically. Synchronization across threads is the
/// implementation's business.
pub trait DataSource: Send + Sync {
    /// Current value. The snapshot stays valid until released.
    fn read(&self) -> Result<Arc<VariantData>>;

    /// The snapshot from a matching `read` is no longer inspected.
    fn release(&self, _snapshot: &VariantData) {}

    /// Push a new value. Read-only sources refuse.
    fn write(&self, _data: VariantData) -> Result<()> {
        Err(Error::NotSupported("data source is read-only"))
    }

    /// Tear down the source's own resources. Called once, when the owning
    /// variant drops the source, even if other handles to it remain.
    fn delete(&self) {}
}

impl<S: DataSource + ?Sized> DataSource for Arc<S> {
    fn read(&self) -> Result<Arc<VariantData>> {
        (**self).read()
    }

    fn release(&self, snapshot: &VariantData) {
        (**self).release(snapshot);
    }

    fn write(&self, data: VariantData) -> Result<()> {
        (**self).write(data)
    }

    fn delete(&self) {
        (**self).delete();
    }
}

/// A snapshot obtained from [`DataSource::read`], released on drop.
pub struct SourceRead<'a> {
    source: &'a dyn DataSource,
    snapshot: Arc<VariantData>,
}

impl<'a> SourceRead<'a> {
    pub(crate) fn new(source: &'a dyn DataSource) -> Result<Self> {
        let snapshot = source.read()?;
        Ok(Self { source, snapshot })
    }
}

impl Deref for SourceRead<'_> {
    type Target = VariantData;

    fn deref(&self) -> &VariantData {
        &self.snapshot
    }
}

impl Drop for SourceRead<'_> {
    fn drop(&mut self) {
        self.source.release(&self.snapshot);
    }
}

/// Thread-safe data source over a replaceable value.
///
/// Readers get the value current at the time of the read; a concurrent
/// [`replace`](Self::replace) or write never disturbs a snapshot already
/// handed out.
pub struct SharedDataSource {
    current: RwLock<Arc<VariantData>>,
    outstanding: AtomicUsize,
    writable: bool,
}

impl SharedDataSource {
    /// Writable source seeded with `data`.
    #[must_use]
    pub fn new(data: VariantData) -> Self {
        Self {
            current: RwLock::new(Arc::new(data)),
            outstanding: AtomicUsize::new(0),
            writable: true,
        }
    }

    /// Source that refuses writes. [`replace`](Self::replace) still works.
    #[must_use]
    pub fn read_only(data: VariantData) -> Self {
        Self {
            writable: false,
            ..Self::new(data)
        }
    }

    /// Swap in a new value, returning the previous one.
    pub fn replace(&self, data: VariantData) -> Arc<VariantData> {
        std::mem::replace(&mut *self.current.write(), Arc::new(data))
    }

    /// Reads not yet released.
    #[must_use]
    pub fn outstanding_reads(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }
}

impl DataSource for SharedDataSource {
    fn read(&self) -> Result<Arc<VariantData>> {
        let snapshot = Arc::clone(&self.current.read());
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        Ok(snapshot)
    }

    fn release(&self, _snapshot: &VariantData) {
        let released = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        if released.is_err() {
            log::warn!("[datasource] release without matching read");
        }
    }

    fn write(&self, data: VariantData) -> Result<()> {
        if !self.writable {
            return Err(Error::NotSupported("data source is read-only"));
        }
        self.replace(data);
        Ok(())
    }

    fn delete(&self) {
        let outstanding = self.outstanding.load(Ordering::Acquire);
        if outstanding > 0 {
            log::warn!("[datasource] deleted with {} unreleased reads", outstanding);
        } else {
            log::debug!("[datasource] deleted");
        }
    }
}
