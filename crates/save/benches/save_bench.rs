//! Save/load performance benchmarks at fleet scale.
//!
//! Measures the full pipeline for airfields with 100, 1K and 5K aircraft:
//! capture (ECS -> SaveFile), encode + compress + header, and the reverse
//! load path into a fresh world.
//!
//! Run with: `cargo bench -p airside_save --bench save_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use save::{capture_world, load_from_bytes, save_to_bytes, SaveOptions};
use simulation::aircraft::AircraftSpec;
use simulation::station::{StationId, TilePos};
use simulation::test_harness::TestAirfield;
use simulation::topology::AirportKind;

const AIRPORTS: u32 = 10;

/// Airports in a row, every aircraft circling inbound so the fleet carries
/// full flight state.
fn build_field(aircraft: usize) -> TestAirfield {
    let mut field = TestAirfield::new();
    for i in 0..AIRPORTS {
        field = field.with_station(AirportKind::Small, TilePos { x: 16 + i * 22, y: 120 });
    }
    let jet = AircraftSpec::plane(476, 18);
    for n in 0..aircraft {
        let target = StationId(n as u32 % AIRPORTS);
        let next = StationId((n as u32 + 1) % AIRPORTS);
        let at = ((n as i32 % 64) * 60, (n as i32 / 64 % 64) * 60);
        field.spawn_inbound(target, jet, at, &[target, next]);
    }
    field.tick(50);
    field
}

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");
    group.sample_size(20);
    for size in [100usize, 1_000, 5_000] {
        let mut field = build_field(size);

        group.bench_with_input(BenchmarkId::new("capture", size), &size, |b, _| {
            b.iter(|| black_box(capture_world(field.world_mut()).expect("capture")))
        });
        for compress in [false, true] {
            let label = if compress { "bytes_lz4" } else { "bytes_raw" };
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| {
                    black_box(
                        save_to_bytes(field.world_mut(), SaveOptions { compress }).expect("save"),
                    )
                })
            });
        }
    }
    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    group.sample_size(20);
    for size in [100usize, 1_000, 5_000] {
        let mut field = build_field(size);
        let bytes = save_to_bytes(field.world_mut(), SaveOptions::default()).expect("save");
        let mut target = TestAirfield::new();

        group.bench_with_input(BenchmarkId::new("from_bytes", size), &bytes, |b, bytes| {
            b.iter(|| load_from_bytes(target.world_mut(), black_box(bytes)).expect("load"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_save, bench_load);
criterion_main!(benches);
