//! # AtomSpace Benchmarks
//!
//! Performance benchmarks for atomspace-core store operations.
//!
//! Run with: `cargo bench -p atomspace-core`

use atomspace_core::{AtomId, AtomSpace, Pattern};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const TYPES: [&str; 4] = ["ConceptNode", "PredicateNode", "NumberNode", "SchemaNode"];

/// Create a store with N atoms spread over four types.
fn create_space(size: usize) -> AtomSpace {
    let mut space = AtomSpace::new();
    for i in 0..size {
        space
            .create_atom(TYPES[i % TYPES.len()], &format!("atom-{i}"), None)
            .expect("insert");
    }
    space
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_atom_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("atom_insertion");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(create_space(size)));
        });
    }

    group.finish();
}

fn bench_link_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_insertion");

    for size in [100, 1000, 10000].iter() {
        let base = create_space(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut space = base.clone();
                for i in 1..size as u64 {
                    let _ = space.create_link("InheritanceLink", vec![AtomId(i - 1), AtomId(i)], None);
                }
                black_box(space)
            });
        });
    }

    group.finish();
}

fn bench_pattern_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_query");
    let pattern = Pattern::any().with_type("ConceptNode").with_name("atom-40");

    for size in [100, 1000, 10000].iter() {
        let space = create_space(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(space.query(black_box(&pattern))));
        });
    }

    group.finish();
}

fn bench_type_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_by_type");

    for size in [100, 1000, 10000].iter() {
        let space = create_space(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(space.list_atoms(Some("PredicateNode"))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_atom_insertion,
    bench_link_insertion,
    bench_pattern_query,
    bench_type_filter
);
criterion_main!(benches);
