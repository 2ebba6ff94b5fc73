//! Move resolution: sliding and merging tiles for one directional move.
//!
//! Tiles are processed farthest-first along the direction of travel so that a
//! tile never stops short behind a tile that has not moved yet. Each tile
//! either merges into the first tile it meets (equal value, not itself the
//! product of a merge this move), slides to the farthest empty cell, or stays.

use crate::game::{Coord, Direction, Grid, Tile, TileId, TileIds};
use serde::Serialize;

/// One observable consequence of a move, for renderers.
///
/// Informational only; the grid is the authoritative state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MoveEffect {
    /// A tile slid without merging.
    Slid {
        /// The tile that moved.
        tile: TileId,
        /// Where it started.
        from: Coord,
        /// Where it stopped.
        to: Coord,
    },
    /// Two tiles merged into a new one.
    Merged {
        /// The newly created tile.
        tile: Tile,
        /// Cell the moving tile left.
        from: Coord,
        /// Cell now holding the merged tile.
        into: Coord,
    },
    /// A tile appeared in an empty cell.
    Spawned {
        /// The new tile.
        tile: Tile,
        /// Where it appeared.
        at: Coord,
    },
}

/// The outcome of resolving one direction against a grid.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Grid after sliding and merging, before any spawn.
    pub grid: Grid,
    /// Slides and merges in processing order.
    pub effects: Vec<MoveEffect>,
    /// Sum of the values of tiles created by merges.
    pub score_delta: u64,
    /// Whether any tile slid or merged.
    pub moved: bool,
    /// Whether a merge produced exactly the win value.
    pub reached_win: bool,
}

impl Resolution {
    /// Number of merges performed.
    #[must_use]
    pub fn merges(&self) -> usize {
        self.effects
            .iter()
            .filter(|effect| matches!(effect, MoveEffect::Merged { .. }))
            .count()
    }
}

/// Direction-dependent cell processing order.
///
/// Rows and columns run `0..n`, reversed along an axis whose vector
/// component is `+1`.
#[derive(Debug, Clone)]
pub struct Traversal {
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl Traversal {
    /// Build the traversal for a board of side `size`.
    #[must_use]
    pub fn new(size: usize, direction: Direction) -> Self {
        let (dr, dc) = direction.vector();
        let mut rows: Vec<usize> = (0..size).collect();
        let mut cols: Vec<usize> = (0..size).collect();
        if dr == 1 {
            rows.reverse();
        }
        if dc == 1 {
            cols.reverse();
        }
        Self { rows, cols }
    }

    /// Cells in processing order, rows outermost.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.rows
            .iter()
            .flat_map(move |&row| self.cols.iter().map(move |&col| Coord::new(row, col)))
    }
}

/// Where a tile would stop when sliding from `from`.
///
/// Returns the last empty cell reached (`from` itself when blocked) and the
/// first occupied cell beyond it, if that cell is on the board.
#[must_use]
pub fn find_farthest(grid: &Grid, from: Coord, direction: Direction) -> (Coord, Option<Coord>) {
    let mut farthest = from;
    loop {
        match grid.step(farthest, direction) {
            Some(next) if grid.at(next).is_none() => farthest = next,
            next => return (farthest, next),
        }
    }
}

/// Resolve a move without mutating `grid`.
///
/// Fresh ids for merged tiles come from `ids`. `win_value` is the tile value
/// whose creation by a merge sets [`Resolution::reached_win`]. No tile is
/// spawned here.
#[must_use]
pub fn resolve(
    grid: &Grid,
    direction: Direction,
    ids: &mut TileIds,
    win_value: u32,
) -> Resolution {
    let mut next_grid = grid.clone();
    next_grid.clear_merge_marks();

    let mut effects = Vec::new();
    let mut score_delta = 0u64;
    let mut reached_win = false;

    for coord in Traversal::new(grid.size(), direction).cells() {
        let Some(tile) = next_grid.at(coord).copied() else {
            continue;
        };

        let (farthest, next) = find_farthest(&next_grid, coord, direction);
        let target = next.and_then(|at| next_grid.at(at).copied().map(|t| (at, t)));

        match target {
            Some((into, other)) if other.merges_with(&tile) && !other.is_merged() => {
                let merged = Tile::merged(&tile, &other, ids);
                next_grid.take(coord);
                next_grid.place(into, merged);
                score_delta += u64::from(merged.value);
                if merged.value == win_value {
                    reached_win = true;
                }
                effects.push(MoveEffect::Merged {
                    tile: merged,
                    from: coord,
                    into,
                });
            }
            _ if farthest != coord => {
                next_grid.take(coord);
                next_grid.place(farthest, tile);
                effects.push(MoveEffect::Slid {
                    tile: tile.id,
                    from: coord,
                    to: farthest,
                });
            }
            _ => {}
        }
    }

    Resolution {
        grid: next_grid,
        moved: !effects.is_empty(),
        effects,
        score_delta,
        reached_win,
    }
}
