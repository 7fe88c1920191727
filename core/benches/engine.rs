use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minefield_core::*;
use std::hint::black_box;

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    for name in PresetName::ALL {
        let difficulty = Presets::default().get(name);
        for placement in [Placement::Shuffle, Placement::Rejection] {
            let id = BenchmarkId::new(format!("{placement:?}"), name);
            group.bench_with_input(id, &difficulty, |b, &difficulty| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    RandomMinefieldGenerator::new(seed, (0, 0), StartTile::AlwaysZero)
                        .with_placement(placement)
                        .generate(black_box(difficulty))
                });
            });
        }
    }
    group.finish();
}

fn bench_first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for name in PresetName::ALL {
        let difficulty = Presets::default().get(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &difficulty, |b, &difficulty| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                let mut session = GameSession::with_seed(difficulty, seed);
                session.reveal_cell(black_box(difficulty.rows() / 2), difficulty.columns() / 2)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_placement, bench_first_reveal);
criterion_main!(benches);
