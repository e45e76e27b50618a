//! Matching benchmarks.
//!
//! Run with: `cargo bench -p swaggy-router`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;
use swaggy_document::OperationMetadata;
use swaggy_router::RouteTable;

fn build_table(num_routes: usize) -> RouteTable {
    let mut builder = RouteTable::builder();

    for i in 0..num_routes / 3 {
        builder
            .route(
                &format!("/api/v1/resource{i}"),
                Method::GET,
                OperationMetadata::new().with_operation_id(format!("getResource{i}")),
            )
            .unwrap();
    }

    for i in 0..num_routes / 3 {
        builder
            .route(
                &format!("/api/v1/resource{i}/{{id}}"),
                Method::GET,
                OperationMetadata::new().with_operation_id(format!("getResourceById{i}")),
            )
            .unwrap();
    }

    for i in 0..num_routes / 3 {
        builder
            .route(
                &format!("/api/v1/org/{{orgId}}/resource{i}/{{id}}"),
                Method::GET,
                OperationMetadata::new().with_operation_id(format!("getOrgResource{i}")),
            )
            .unwrap();
    }

    builder.build()
}

fn bench_literal_match(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("literal_match", |b| {
        b.iter(|| black_box(table.match_request("GET", "/api/v1/resource30")));
    });
}

fn bench_capture_match(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("capture_match", |b| {
        b.iter(|| black_box(table.match_request("GET", "/api/v1/resource25/12345")));
    });
}

fn bench_messy_path(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("messy_path", |b| {
        b.iter(|| {
            black_box(table.match_request("GET", "//api///v1/org/acme-corp//resource10/12345/"))
        });
    });
}

fn bench_method_miss(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("method_miss", |b| {
        b.iter(|| black_box(table.match_request("DELETE", "/api/v1/resource25/12345")));
    });
}

fn bench_path_miss(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("path_miss", |b| {
        b.iter(|| black_box(table.match_request("GET", "/api/v1/nonexistent/path")));
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for num_routes in [10, 50, 100, 500, 1000] {
        let table = build_table(num_routes);

        group.bench_with_input(
            BenchmarkId::new("capture_match", num_routes),
            &num_routes,
            |b, &n| {
                let path = format!("/api/v1/resource{}/12345", n / 6);
                b.iter(|| black_box(table.match_request("GET", &path)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_literal_match,
    bench_capture_match,
    bench_messy_path,
    bench_method_miss,
    bench_path_miss,
    bench_scaling
);
criterion_main!(benches);
