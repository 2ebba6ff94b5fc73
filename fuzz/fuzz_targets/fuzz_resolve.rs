#![no_main]

//! Move resolution fuzzer.
//!
//! Builds an arbitrary board, resolves one direction, and checks that no tile
//! merged twice, values stay powers of two, and the score matches the merges.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use merge1024::game::{check_effects, check_invariants, resolve, Grid, MoveEffect, TileIds};
use merge1024::Direction;

/// Structured input for resolution fuzzing.
#[derive(Arbitrary, Debug)]
struct ResolveInput {
    /// Board side, reduced into 2..=8.
    size: u8,
    /// Cell exponents; 0 is empty, otherwise the value is 2^(e % 15 + 1).
    cells: Vec<u8>,
    /// Direction code, reduced modulo 4.
    direction: u8,
}

fuzz_target!(|input: ResolveInput| {
    let size = usize::from(input.size % 7) + 2;
    let rows: Vec<Vec<u32>> = (0..size)
        .map(|row| {
            (0..size)
                .map(|col| match input.cells.get(row * size + col).copied().unwrap_or(0) {
                    0 => 0,
                    e => 1u32 << (u32::from(e) % 15 + 1),
                })
                .collect()
        })
        .collect();

    let mut ids = TileIds::new();
    let Ok(grid) = Grid::from_rows(&rows, &mut ids) else {
        return;
    };
    let Ok(direction) = Direction::try_from(input.direction % 4) else {
        return;
    };

    let res = resolve(&grid, direction, &mut ids, 1024);

    let violations = check_effects(&res.effects);
    assert!(violations.is_empty(), "effect violations: {violations:?}");
    let violations = check_invariants(&res.grid);
    assert!(violations.is_empty(), "grid violations: {violations:?}");

    let merged: u64 = res
        .effects
        .iter()
        .filter_map(|effect| match effect {
            MoveEffect::Merged { tile, .. } => Some(u64::from(tile.value)),
            _ => None,
        })
        .sum();
    assert_eq!(res.score_delta, merged);
    assert_eq!(res.grid.tile_count(), grid.tile_count() - res.merges());
});
