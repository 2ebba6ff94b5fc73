//! Random sources and tile spawning.

use crate::game::{Coord, Grid, Tile, TileIds};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Randomness consumed by the engine.
///
/// Injected so that games are reproducible from a seed and tests can script
/// exact spawn positions and values.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Uniform sample in `[0, 1)`.
    fn chance(&mut self) -> f64;
}

/// Seeded pseudo-random source.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic source for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn chance(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Replays fixed sequences of indices and chances.
///
/// Exhausted sequences yield `0` and `0.0`; indices are clamped to `len - 1`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    indices: VecDeque<usize>,
    chances: VecDeque<f64>,
}

impl ScriptedRandom {
    /// Script the given index and chance sequences.
    #[must_use]
    pub fn new(
        indices: impl IntoIterator<Item = usize>,
        chances: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            chances: chances.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0).min(len.saturating_sub(1))
    }

    fn chance(&mut self) -> f64 {
        self.chances.pop_front().unwrap_or(0.0)
    }
}

/// Place one tile in a uniformly chosen empty cell.
///
/// The cell is drawn first, then the value: 2, or 4 with probability
/// `four_probability`. Returns `None` on a full grid.
pub fn spawn_random_tile<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    ids: &mut TileIds,
    four_probability: f64,
) -> Option<(Coord, Tile)> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let at = empty[rng.pick_index(empty.len())];
    let value = if rng.chance() < 1.0 - four_probability { 2 } else { 4 };
    let tile = Tile {
        value,
        id: ids.allocate(),
        merged_from: None,
    };
    grid.place(at, tile);
    Some((at, tile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..100 {
            assert_eq!(a.pick_index(16), b.pick_index(16));
        }
    }

    #[test]
    fn test_seeded_ranges() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..1000 {
            assert!(rng.pick_index(5) < 5);
            let c = rng.chance();
            assert!((0.0..1.0).contains(&c));
        }
    }

    #[test]
    fn test_scripted_replays_and_clamps() {
        let mut rng = ScriptedRandom::new([3, 99], [0.95]);
        assert_eq!(rng.pick_index(16), 3);
        assert_eq!(rng.pick_index(4), 3);
        assert_eq!(rng.pick_index(4), 0);
        assert!(rng.chance() > 0.9);
        assert!(rng.chance() < f64::EPSILON);
    }

    #[test]
    fn test_spawn_picks_scripted_cell_and_value() {
        let mut grid = Grid::new(2).unwrap();
        let mut ids = TileIds::new();
        let mut rng = ScriptedRandom::new([2, 0], [0.5, 0.95]);

        let (at, tile) = spawn_random_tile(&mut grid, &mut rng, &mut ids, 0.1).unwrap();
        assert_eq!(at, Coord::new(1, 0));
        assert_eq!(tile.value, 2);

        // Empty cells are now (0,0), (0,1), (1,1).
        let (at, tile) = spawn_random_tile(&mut grid, &mut rng, &mut ids, 0.1).unwrap();
        assert_eq!(at, Coord::new(0, 0));
        assert_eq!(tile.value, 4);
        assert_eq!(grid.tile_count(), 2);
    }

    #[test]
    fn test_spawn_on_full_grid() {
        let mut ids = TileIds::new();
        let mut grid = Grid::from_rows(&[[2u32, 4], [4, 2]], &mut ids).unwrap();
        let mut rng = SeededRandom::new(1);
        assert!(spawn_random_tile(&mut grid, &mut rng, &mut ids, 0.1).is_none());
        assert_eq!(ids.peek_next(), 4);
    }

    #[test]
    fn test_spawn_distribution() {
        let mut rng = SeededRandom::new(1234);
        let mut ids = TileIds::new();
        let mut fours = 0;
        for _ in 0..10_000 {
            let mut grid = Grid::new(4).unwrap();
            let (_, tile) = spawn_random_tile(&mut grid, &mut rng, &mut ids, 0.1).unwrap();
            if tile.value == 4 {
                fours += 1;
            }
        }
        assert!((700..1300).contains(&fours), "fours = {fours}");
    }
}
