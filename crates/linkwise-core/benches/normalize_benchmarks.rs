//! Benchmarks for response normalization and cached lookups
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linkwise_core::{normalize, ApiHost, ClientConfig, MemoryLayer, Payload, Stack};
use serde_json::{json, Value};

fn create_repository(i: usize) -> Value {
    json!({
        "id": i,
        "name": format!("project-{}", i),
        "url": format!("https://api.example.com/repos/octocat/project-{}", i),
        "html_url": format!("https://example.com/octocat/project-{}", i),
        "forks": i % 17,
        "watchers_count": i * 3,
        "created_at": "2011-01-26T19:01:12Z",
        "user": {
            "username": "octocat",
            "gravatar_url": "https://gravatar.example/octocat",
            "url": "https://api.example.com/users/octocat"
        },
        "last_commit": {
            "commit_id": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "committed_at": "2011-04-14T16:00:49Z",
            "timestamp": 1302796849,
            "user": {"username": "monalisa"}
        }
    })
}

fn create_listing(size: usize) -> Value {
    Value::Array((0..size).map(create_repository).collect())
}

fn host() -> ApiHost {
    ApiHost::parse("https://api.example.com").unwrap()
}

fn bench_single_object(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_object");
    let host = host();
    let raw = Payload::from(create_repository(1));

    group.bench_function("raw", |b| {
        b.iter(|| normalize(black_box(raw.clone()), &host));
    });

    let canonical = normalize(raw.clone(), &host);
    group.bench_function("already_canonical", |b| {
        b.iter(|| normalize(black_box(canonical.clone()), &host));
    });

    group.finish();
}

fn bench_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_listing");
    let host = host();

    for size in [10, 100, 1000] {
        let raw = Payload::from(create_listing(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| normalize(black_box(raw.clone()), &host));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_lookup");
    let config = ClientConfig::default().with_api_host("https://api.example.com");
    let backend = MemoryLayer::new(host()).with_resource("repos/octocat/listing", create_listing(100));

    let cached = Stack::default_stack().build(Box::new(backend), &config).unwrap();
    cached.lookup("repos/octocat/listing").unwrap();
    group.bench_function("cache_hit", |b| {
        b.iter(|| cached.lookup(black_box("repos/octocat/listing")).unwrap());
    });

    let backend = MemoryLayer::new(host()).with_resource("repos/octocat/listing", create_listing(100));
    let uncached = Stack::default_stack()
        .build(Box::new(backend), &config.clone().without_cache())
        .unwrap();
    group.bench_function("cache_disabled", |b| {
        b.iter(|| uncached.lookup(black_box("repos/octocat/listing")).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_single_object, bench_listing, bench_pipeline);

criterion_main!(benches);
