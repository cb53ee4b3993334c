// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lifecycle Benchmark
//!
//! Measures the cost of the operations every request path goes through:
//! - typed deep copy of small structured values
//! - erased copy through the registry (descriptor dispatch)
//! - bounded array allocation and element-wise copy
//! - variant copy of owned arrays

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uatypes::{
    array_copy, array_new, generic,
    ns0::{self, types},
    DataType, QualifiedName, UaString, Value, Variant,
};

fn bench_typed_copy(c: &mut Criterion) {
    let qn = QualifiedName::copy_cstring("the answer").expect("name");
    c.bench_function("qualified_name_copy", |b| {
        b.iter(|| black_box(&qn).try_copy().expect("copy"));
    });
}

fn bench_erased_copy(c: &mut Criterion) {
    let desc = ns0::descriptor(types::QUALIFIEDNAME).expect("descriptor");
    let src: Box<dyn Value> = Box::new(QualifiedName::copy_cstring("the answer").expect("name"));
    let mut dst = generic::new(desc).expect("new");
    c.bench_function("generic_copy_qualified_name", |b| {
        b.iter(|| generic::copy(black_box(src.as_ref()), dst.as_mut(), desc).expect("copy"));
    });
}

fn bench_arrays(c: &mut Criterion) {
    let mut group = c.benchmark_group("array");
    for count in [16i32, 1024, 65_536] {
        let desc = ns0::descriptor(types::UINT32).expect("descriptor");
        group.bench_with_input(BenchmarkId::new("new_uint32", count), &count, |b, &n| {
            b.iter(|| array_new(black_box(n), desc).expect("array"));
        });

        let strings = ns0::descriptor(types::STRING).expect("descriptor");
        let src = array_new(count, strings).expect("array");
        group.bench_with_input(BenchmarkId::new("copy_null_strings", count), &count, |b, _| {
            b.iter(|| array_copy(black_box(src.as_ref()), strings).expect("copy"));
        });
    }
    group.finish();
}

fn bench_variant_copy(c: &mut Criterion) {
    let mut v = Variant::new();
    v.set_array(
        (0..256)
            .map(|i| UaString::copy_printf(format_args!("tag-{}", i)).expect("tag"))
            .collect::<Vec<_>>(),
    )
    .expect("array");
    c.bench_function("variant_copy_256_strings", |b| {
        b.iter(|| black_box(&v).try_copy().expect("copy"));
    });
}

criterion_group!(
    benches,
    bench_typed_copy,
    bench_erased_copy,
    bench_arrays,
    bench_variant_copy
);
criterion_main!(benches);
