//! Devis Performance Benchmarks
//!
//! Totals are recomputed on every calculator change, so aggregation and a
//! full toggle round trip are the hot paths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use devis_common::{Commitment, OfferCatalog};
use devis_pricing::{CalculatorState, PricingPolicy, PricingService, Selection};

const ALL_IDS: [&str; 10] = [
    "site-vitrine",
    "site-ecommerce",
    "refonte-site",
    "maintenance-accompagnement",
    "seo-audit",
    "seo-mensuel",
    "social-media",
    "shooting-photo",
    "ghost-1",
    "ghost-2",
];

fn service() -> PricingService {
    PricingService::new(
        OfferCatalog::embedded().expect("embedded catalog"),
        PricingPolicy::default(),
    )
}

/// Benchmark aggregation for growing selections
fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let service = service();

    for size in [0usize, 3, 6, ALL_IDS.len()] {
        let state = CalculatorState {
            selected_services: Selection::from_ids(ALL_IDS.iter().take(size).copied()),
            commitment: Commitment::Months36,
            is_partner: true,
        };
        group.bench_with_input(BenchmarkId::new("selected", size), &state, |b, state| {
            b.iter(|| black_box(service.evaluate(black_box(state))));
        });
    }

    group.finish();
}

/// Benchmark a toggle followed by recomputation and notification
fn bench_toggle(c: &mut Criterion) {
    let service = service();
    let mut calc = service.calculator();
    calc.subscribe(|update: &devis_pricing::CalculatorUpdate| {
        black_box(update.totals.grand_total);
    });

    c.bench_function("toggle_round_trip", |b| {
        b.iter(|| {
            calc.toggle(black_box("seo-mensuel"));
        });
    });
}

/// Benchmark building the id index from the catalog
fn bench_index(c: &mut Criterion) {
    let catalog = OfferCatalog::embedded().expect("embedded catalog");
    c.bench_function("index_build", |b| {
        b.iter(|| black_box(devis_common::OfferIndex::new(catalog.clone())));
    });
}

criterion_group!(benches, bench_aggregate, bench_toggle, bench_index);
criterion_main!(benches);
