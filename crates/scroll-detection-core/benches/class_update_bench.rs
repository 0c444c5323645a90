#![forbid(unsafe_code)]

use criterion::{Criterion, criterion_group, criterion_main};
use scroll_detection_core::{ClassAttribute, DocumentMeasurements, ScrollDetector, TokenSet};
use std::hint::black_box;

fn page(offset: f64) -> DocumentMeasurements {
    DocumentMeasurements::scrolled(offset, 4800.0, 900.0)
}

fn bench_class_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector/class_update");
    let det = ScrollDetector::default();

    group.bench_function("token_set_scroll_down_64", |b| {
        b.iter(|| {
            let mut set = TokenSet::new();
            for step in 0..64 {
                let update = det.handle_event(&page(f64::from(step) * 8.0), &mut set);
                black_box(update.added.len());
            }
            black_box(set.len());
        });
    });

    group.bench_function("class_attribute_scroll_down_64", |b| {
        b.iter(|| {
            let mut attr = ClassAttribute::new("page-home theme-dark has-header");
            for step in 0..64 {
                let update = det.handle_event(&page(f64::from(step) * 8.0), &mut attr);
                black_box(update.removed);
            }
            black_box(attr.as_str().len());
        });
    });

    group.bench_function("class_attribute_frozen_past_range", |b| {
        b.iter(|| {
            let mut attr = ClassAttribute::new("page-home");
            for step in 0..64 {
                let update = det.handle_event(&page(400.0 + f64::from(step) * 40.0), &mut attr);
                black_box(update.full_reset);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_class_update);
criterion_main!(benches);
