//! Benchmarks for random rollouts and MCTS search

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;

use azul_engine::setup_game;
use azul_search::{simulate, Mcts, MctsConfig};

fn bench_rollout(c: &mut Criterion) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let state = setup_game(&mut rng);

    c.bench_function("rollout_from_setup", |b| {
        b.iter(|| black_box(simulate(black_box(&state), &mut rng)))
    });
}

fn bench_mcts_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search");
    group.sample_size(10);

    for iterations in [50, 200, 1000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &iterations,
            |b, &iterations| {
                let mut rng = rand::rngs::StdRng::seed_from_u64(42);
                let state = setup_game(&mut rng);
                let mcts = Mcts::new(MctsConfig::default().with_iterations(iterations));

                b.iter(|| black_box(mcts.search(black_box(&state), &mut rng)))
            },
        );
    }

    group.finish();
}

fn bench_root_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_root_parallel");
    group.sample_size(10);

    for workers in [1, 2, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &workers,
            |b, &workers| {
                let mut rng = rand::rngs::StdRng::seed_from_u64(42);
                let state = setup_game(&mut rng);
                let config = MctsConfig::default()
                    .with_iterations(800)
                    .with_workers(workers);
                let mcts = Mcts::new(config);

                b.iter(|| black_box(mcts.search(black_box(&state), &mut rng)))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_rollout, bench_mcts_search, bench_root_parallel);
criterion_main!(benches);
