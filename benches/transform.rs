// benches/transform.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use bc_liquor::flatten::flatten;
use bc_liquor::specs::browse::Hit;
use bc_liquor::transform::{transform, Variant};

fn sample_hits(n: usize) -> Vec<Hit> {
    (0..n)
        .map(|i| {
            let sku = format!("{:06}", i);
            let hit: Value = json!({
                "_id": sku,
                "_score": null,
                "sort": [format!("name-{i}")],
                "_source": {
                    "sku": sku,
                    "category": {"id": 1, "description": "Wine"},
                    "subCategory": {"id": 2, "description": "Red Wine"},
                    "class": {"id": 3, "description": "Table"},
                    "volume": "0.75",
                    "unitSize": 1 + (i % 24),
                    "availableUnits": i % 500,
                    "regularPrice": format!("{}.99", 5 + i % 80),
                    "currentPrice": format!("{}.49", 5 + i % 80),
                    "_regularPrice": "0",
                    "_currentPrice": "0",
                    "alcoholPercentage": (i % 45) as f64,
                    "storeCount": i % 200,
                    "consumerRating": 3.5,
                    "votes": i % 30,
                }
            });
            hit.as_object().cloned().unwrap()
        })
        .collect()
}

fn bench_transform(c: &mut Criterion) {
    let hits = sample_hits(5000);
    let flat = flatten(&hits).expect("flatten sample");

    c.bench_function("flatten_5000", |b| {
        b.iter(|| black_box(flatten(black_box(&hits)).map(|t| t.len())))
    });

    c.bench_function("transform_export_5000", |b| {
        b.iter(|| black_box(transform(black_box(flat.clone()), Variant::Export).map(|t| t.len())))
    });

    c.bench_function("transform_periodic_5000", |b| {
        b.iter(|| black_box(transform(black_box(flat.clone()), Variant::Periodic).map(|t| t.len())))
    });
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
