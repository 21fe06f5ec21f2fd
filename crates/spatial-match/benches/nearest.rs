use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sighting_data::{Event, EventId, RiskLevel, TerrainCell};
use spatial_match::TerrainMatcher;

/// Square grid of `side * side` cells over northern Tohoku
fn grid(side: usize) -> Vec<TerrainCell> {
    let step = 1.0 / side as f64;
    (0..side * side)
        .map(|i| TerrainCell {
            latitude: 39.0 + (i / side) as f64 * step,
            longitude: 140.0 + (i % side) as f64 * step,
            elevation: Some((i % 900) as f64),
            slope_angle: Some((i % 45) as f64),
            distance_to_settlement: Some((i % 20) as f64 * 0.5),
            fruit_availability: Some((i % 10) as f64 * 0.1),
        })
        .collect()
}

fn sightings(n: usize) -> Vec<Event> {
    let timestamp = NaiveDate::from_ymd_opt(2023, 6, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap();
    (0..n)
        .map(|i| Event {
            id: EventId(i),
            timestamp,
            latitude: 39.0 + ((i * 7919) % 1000) as f64 * 0.001,
            longitude: 140.0 + ((i * 104_729) % 1000) as f64 * 0.001,
            species: None,
            risk_level: RiskLevel::Low,
        })
        .collect()
}

fn bench_match_events(c: &mut Criterion) {
    let events = sightings(1_000);
    let mut group = c.benchmark_group("match_events");
    for side in [10usize, 50, 100] {
        let cells = grid(side);
        let matcher = TerrainMatcher::new(&cells).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &events, |b, events| {
            b.iter(|| matcher.match_events(black_box(events)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_match_events);
criterion_main!(benches);
