use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlweave::{Builder, Cond, Dialect, Value, select};

/// SELECT col0, col1, ... FROM t WHERE col0 = ? AND col1 = ? ... ORDER BY col0
fn build_select(n: usize) -> Builder {
    let cols: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let col_refs: Vec<&str> = cols.iter().map(String::as_str).collect();

    let mut q = select(&col_refs).from("t").order_by("col0");
    for (i, col) in cols.iter().enumerate() {
        q = q.eq(col, i as i64);
    }
    q
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/build");

    for n in [1, 5, 10, 50, 100] {
        let q = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &q, |b, q| {
            b.iter(|| black_box(q.build()));
        });
    }

    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/paginate");
    let base = build_select(10);

    for dialect in Dialect::KNOWN {
        let q = base
            .clone()
            .dialect(dialect.clone())
            .limit(20)
            .offset(40)
            .primary_key("col0");
        group.bench_with_input(BenchmarkId::from_parameter(&dialect), &q, |b, q| {
            b.iter(|| black_box(q.build()));
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<Value> = (0..n).map(Value::Int).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let q = select(&[]).from("t").in_list("id", values.clone());
                black_box(q.build())
            });
        });
    }

    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/nested");

    for depth in [1, 4, 16] {
        let mut q = select(&["id"]).from("t").gt("id", 0i64);
        for level in 0..depth {
            q = select(&["id"])
                .from("t")
                .filter(Cond::in_query("id", q).and(Cond::lt("id", level as i64)));
        }
        group.bench_with_input(BenchmarkId::from_parameter(depth), &q, |b, q| {
            b.iter(|| black_box(q.build()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_paginate,
    bench_in_list,
    bench_nested
);
criterion_main!(benches);
