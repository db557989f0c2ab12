//! Catalog construction and argument validation benchmark.
//!
//! Compiling every input schema happens once at startup; validation runs on
//! every tool call. Both are measured with Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lightrag_mcp::{ToolCatalog, ToolKind};
use serde_json::json;

fn bench_build_catalog(c: &mut Criterion) {
    c.bench_function("catalog_full", |b| {
        b.iter(|| ToolCatalog::full().unwrap());
    });
}

fn bench_validate_params(c: &mut Criterion) {
    let catalog = ToolCatalog::full().unwrap();
    let cases = [
        (ToolKind::Health, json!({})),
        (ToolKind::DocumentsUploadFiles, json!({"file_paths": ["/a.txt", "/b.pdf", "/c.md"]})),
        (
            ToolKind::Query,
            json!({"query": "What links Alice and Bob?", "mode": "hybrid", "top_k": 20}),
        ),
        (ToolKind::Query, json!({"query": "q", "mode": "fast", "top_k": 0})),
    ];

    let mut group = c.benchmark_group("validate_params");
    for (i, (kind, params)) in cases.iter().enumerate() {
        let id = format!("{}_{}", kind.name(), i);
        group.bench_with_input(BenchmarkId::from_parameter(id), params, |b, p| {
            b.iter(|| catalog.validate_params(*kind, black_box(p)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_catalog, bench_validate_params);
criterion_main!(benches);
