use chrono::{NaiveDate, TimeDelta};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use event_window::TrailingWindowCounter;
use sighting_data::{Event, EventId, RiskLevel};

fn sightings(n: usize) -> Vec<Event> {
    let base = NaiveDate::from_ymd_opt(2023, 4, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    (0..n)
        .map(|i| Event {
            id: EventId(i),
            // scrambled but deterministic arrival order
            timestamp: base + TimeDelta::minutes(((i * 7919) % (n * 37)) as i64),
            latitude: 39.0 + (i % 100) as f64 * 0.01,
            longitude: 140.0 + (i % 50) as f64 * 0.01,
            species: None,
            risk_level: RiskLevel::Low,
        })
        .collect()
}

fn bench_trailing_window(c: &mut Criterion) {
    let counter = TrailingWindowCounter::default();
    let mut group = c.benchmark_group("trailing_window");
    for n in [1_000usize, 10_000, 100_000] {
        let events = sightings(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &events, |b, events| {
            b.iter(|| counter.count(black_box(events)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trailing_window);
criterion_main!(benches);
