//! Benchmarks for move resolution and complete headless games.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use merge1024::autoplay::{Strategy, play_game};
use merge1024::game::{Grid, TileIds, legal_directions, resolve};
use merge1024::{Direction, GameConfig};

/// A busy mid-game board with several merges available in every direction.
fn busy_board() -> Grid {
    let rows = [
        [2u32, 2, 4, 8],
        [4, 4, 8, 16],
        [2, 0, 2, 32],
        [64, 64, 0, 128],
    ];
    Grid::from_rows(&rows, &mut TileIds::new()).unwrap()
}

fn bench_resolve(c: &mut Criterion) {
    let grid = busy_board();

    c.bench_function("resolve_all_directions", |b| {
        b.iter(|| {
            let mut ids = TileIds::following(&grid);
            for dir in Direction::ALL {
                black_box(resolve(black_box(&grid), dir, &mut ids, 1024));
            }
        });
    });
}

fn bench_legal_directions(c: &mut Criterion) {
    let grid = busy_board();

    c.bench_function("legal_directions", |b| {
        b.iter(|| black_box(legal_directions(black_box(&grid))));
    });
}

fn bench_single_game(c: &mut Criterion) {
    let config = GameConfig::default();

    c.bench_function("greedy_game", |b| {
        b.iter(|| {
            let result = play_game(black_box(42), Strategy::Greedy, &config, 100_000);
            black_box(result)
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // 10 games sequentially (without parallel overhead)
    let config = GameConfig::default();

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = play_game(black_box(seed), Strategy::Corner, &config, 100_000);
                let _ = black_box(result);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_legal_directions,
    bench_single_game,
    bench_game_batch
);
criterion_main!(benches);
