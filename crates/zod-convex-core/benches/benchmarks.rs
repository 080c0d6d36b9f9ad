//! Criterion benchmarks for the zod-convex-core conversion dispatcher.
//!
//! Schema trees are built outside the benchmark loop to measure only the
//! conversion itself.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use zod_convex_core::{convert, convert_shape, z, Converter, ObjectShape, SchemaNode};

/// A table-like shape with `width` fields covering the common constructors.
fn wide_shape(width: usize) -> ObjectShape {
    z::shape((0..width).map(|i| {
        let node = match i % 6 {
            0 => z::string(),
            1 => z::email().optional(),
            2 => z::int().default(0),
            3 => z::zid("users").array(),
            4 => z::enumeration(["draft", "published", "archived"]),
            _ => z::record(z::string(), z::number().nullable()),
        };
        (format!("field_{i}"), node)
    }))
}

/// Objects nested `depth` levels deep, each with a sibling leaf.
fn deep_object(depth: usize) -> SchemaNode {
    let mut node = z::string();
    for level in 0..depth {
        node = z::object([("leaf", z::boolean()), (format!("child_{level}").as_str(), node)]);
    }
    node
}

fn bench_convert_wide(c: &mut Criterion) {
    let shape = wide_shape(200);

    c.bench_function("convert/wide_shape", |b| {
        b.iter(|| convert_shape(black_box(&shape)).unwrap())
    });
}

fn bench_convert_deep(c: &mut Criterion) {
    let node = deep_object(100);

    c.bench_function("convert/deep_object", |b| {
        b.iter(|| convert(black_box(&node)).unwrap())
    });
}

fn bench_convert_with_report(c: &mut Criterion) {
    let shape = wide_shape(200);
    let converter = Converter::default();

    c.bench_function("convert/wide_shape_with_report", |b| {
        b.iter(|| converter.convert_with_report(black_box(&shape)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_convert_wide,
    bench_convert_deep,
    bench_convert_with_report,
);
criterion_main!(benches);
