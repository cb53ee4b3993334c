// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Allocation tracking: copies and releases must leave the heap balanced.
//!
//! Counters are per thread so tests running in parallel do not disturb
//! each other.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use uatypes::{
    config, generic,
    ns0::{self, types},
    registry, DataType, QualifiedName, SharedDataSource, UaString, Value, Variant, VariantData,
};

struct Counting;

thread_local! {
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
    static LIVE_BLOCKS: Cell<isize> = const { Cell::new(0) };
}

fn adjust(bytes: isize, blocks: isize) {
    // try_with: TLS may already be torn down while a thread exits.
    let _ = LIVE_BYTES.try_with(|c| c.set(c.get() + bytes));
    let _ = LIVE_BLOCKS.try_with(|c| c.set(c.get() + blocks));
}

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            adjust(layout.size() as isize, 1);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        adjust(-(layout.size() as isize), -1);
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

fn live() -> (isize, isize) {
    (LIVE_BYTES.with(Cell::get), LIVE_BLOCKS.with(Cell::get))
}

/// Build the lazily initialized globals outside the measured window.
fn warm_up() {
    let _ = registry();
    let _ = config::runtime();
}

#[test]
fn test_qualified_name_end_to_end() {
    warm_up();
    let before = live();
    {
        let qn = QualifiedName::copy_cstring("the answer").expect("name");
        assert_eq!(qn.namespace_index, 0);
        assert_eq!(qn.name.len(), 10);
        assert_eq!(qn.name.as_bytes(), Some(&b"the answer"[..]));

        let copy = qn.try_copy().expect("copy");
        assert_eq!(copy.name.as_bytes(), qn.name.as_bytes());
        assert_ne!(
            copy.name.as_bytes().map(<[u8]>::as_ptr),
            qn.name.as_bytes().map(<[u8]>::as_ptr)
        );
        assert_eq!(live().1 - before.1, 2);

        drop(qn);
        assert_eq!(copy.name.as_str(), Some("the answer"));
    }
    assert_eq!(live(), before);
}

#[test]
fn test_generic_new_copy_delete_balanced() {
    warm_up();
    let desc = ns0::descriptor(types::READVALUEID).expect("descriptor");
    let before = live();
    {
        let mut src = generic::new(desc).expect("new");
        if let Some(rv) = src.downcast_mut::<uatypes::ReadValueId>() {
            rv.index_range = UaString::copy_cstring("0:3").expect("range");
            rv.data_encoding = QualifiedName::copy_cstring("Default Binary").expect("encoding");
        }
        let mut dst = generic::new(desc).expect("new");
        generic::copy(src.as_ref(), dst.as_mut(), desc).expect("copy");
        assert!(dst.value_eq(src.as_ref()));

        generic::delete_members(dst.as_mut(), desc);
        generic::delete(dst, desc);
        generic::delete(src, desc);
    }
    assert_eq!(live(), before);
}

#[test]
fn test_variant_dispositions_balanced() {
    warm_up();
    let before = live();
    {
        let mut owned = Variant::new();
        owned
            .set_array(vec![
                UaString::copy_cstring("a").expect("a"),
                UaString::null(),
                UaString::empty(),
            ])
            .expect("array");
        let copy = owned.try_copy().expect("copy");
        assert_eq!(copy, owned);
        owned.delete_members();

        let mut source = Variant::new();
        source.set_data_source(
            types::DOUBLE,
            Box::new(SharedDataSource::new(VariantData::scalar(Box::new(1.0f64)))),
        );
        {
            let snap = source.read_source().expect("read");
            assert_eq!(snap.value::<f64>(), Some(&1.0));
        }
        assert!(source.try_copy().is_err());
    }
    assert_eq!(live(), before);
}

#[test]
fn test_failed_array_copy_releases_partial_copy() {
    warm_up();
    let desc = ns0::descriptor(types::VARIANT).expect("descriptor");
    let mut good = Variant::new();
    good.set_value(Box::new(UaString::copy_cstring("copied first").expect("text")));
    let mut live_source = Variant::new();
    live_source.set_data_source(
        types::INT32,
        Box::new(SharedDataSource::new(VariantData::scalar(Box::new(0i32)))),
    );
    let elements: Box<dyn uatypes::ArrayValue> = Box::new(vec![good, live_source]);

    let before = live();
    let err = uatypes::array_copy(elements.as_ref(), desc).unwrap_err();
    assert_eq!(err.status_code(), uatypes::StatusCode::BAD_NOT_SUPPORTED);
    assert_eq!(live(), before);
}

#[test]
fn test_failed_copy_frees_previous_destination_payload() {
    warm_up();
    let desc = ns0::descriptor(types::VARIANT).expect("descriptor");
    let mut live_source = Variant::new();
    live_source.set_data_source(
        types::INT32,
        Box::new(SharedDataSource::new(VariantData::scalar(Box::new(9i32)))),
    );
    let src: Box<dyn Value> = Box::new(live_source);
    let mut dst = generic::new(desc).expect("new");

    let before = live();
    if let Some(v) = dst.downcast_mut::<Variant>() {
        v.set_array(vec![
            UaString::copy_cstring("stale").expect("text"),
            UaString::copy_cstring("payload").expect("text"),
        ])
        .expect("array");
    }
    assert!(live().1 > before.1);

    let err = generic::copy(src.as_ref(), dst.as_mut(), desc).unwrap_err();
    assert_eq!(err.status_code(), uatypes::StatusCode::BAD_NOT_SUPPORTED);
    assert!(dst.downcast_ref::<Variant>().is_some_and(Variant::is_empty));
    assert_eq!(live(), before);

    generic::delete(dst, desc);
    generic::delete(src, desc);
}

#[test]
fn test_value_boxes_release_fully() {
    warm_up();
    let before = live();
    for handler in registry().iter() {
        let v = handler.new_value().expect("new");
        let copy = handler.copy(v.as_ref()).expect("copy");
        assert!(copy.value_eq(v.as_ref()));
        drop(copy);
        drop(v);
    }
    assert_eq!(live(), before);
}
