//! Benchmarks for rendering and full reconciliation runs.
//!
//! Run with: cargo bench -p agora-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use agora_core::render::nodes_to_html;
use agora_core::{
    render_events, render_gallery, ContentSyncEngine, Document, Event, GalleryImage,
    MemoryStore, Trigger, EVENTS_KEY, GALLERY_KEY,
};

fn sample_images(n: usize) -> Vec<GalleryImage> {
    (0..n)
        .map(|i| GalleryImage::new(format!("https://example.org/{i}.jpg"), format!("Photo {i}")))
        .collect()
}

fn sample_events(n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| {
            Event::new(
                format!("Event {i}"),
                "A fairly long description of what happens at this meeting, who should come, \
                 what to bring and where exactly to find the room once inside the building.",
                format!("March {}", i % 28 + 1),
                "3:00 PM",
                "Main Hall",
            )
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for size in [0usize, 10, 100] {
        let images = sample_images(size);
        let events = sample_events(size);

        group.bench_with_input(BenchmarkId::new("gallery", size), &images, |b, images| {
            b.iter(|| render_gallery(black_box(images)))
        });
        group.bench_with_input(BenchmarkId::new("events", size), &events, |b, events| {
            b.iter(|| render_events(black_box(events)))
        });
        group.bench_with_input(BenchmarkId::new("events_html", size), &events, |b, events| {
            b.iter(|| nodes_to_html(&render_events(black_box(events))))
        });
    }
    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for size in [0usize, 10, 100] {
        let store = MemoryStore::new();
        let admin = store.context();
        admin
            .set_item(GALLERY_KEY, &serde_json::to_string(&sample_images(size)).unwrap())
            .unwrap();
        admin
            .set_item(EVENTS_KEY, &serde_json::to_string(&sample_events(size)).unwrap())
            .unwrap();

        let mut engine = ContentSyncEngine::new(store.context(), Document::landing_page());
        group.bench_function(BenchmarkId::new("full_run", size), |b| {
            b.iter(|| engine.reconcile(black_box(Trigger::Tick)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render, bench_reconcile);
criterion_main!(benches);
