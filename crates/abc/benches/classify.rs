use criterion::{Criterion, black_box, criterion_group, criterion_main};

use stockwise_abc::{AbcEngine, ItemUsage, Tier};

/// Deterministic synthetic batch: a long-tailed value curve with a sprinkle
/// of pinned items, roughly what a mid-size store's usage export looks like.
fn synthetic_batch(len: usize) -> Vec<ItemUsage> {
    (0..len)
        .map(|i| {
            let value = 1_000_000.0 / ((i + 1) as f64);
            let item = ItemUsage::valued(i as i64, value);
            if i % 97 == 0 {
                item.with_pinned_tier(Tier::C)
            } else {
                item
            }
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let engine = AbcEngine::default();
    let batch = synthetic_batch(10_000);

    c.bench_function("classify_10k_items", |b| {
        b.iter(|| engine.classify(black_box(&batch)))
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
