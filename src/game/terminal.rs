//! Terminal-condition detection.

use crate::game::{Direction, Grid};

/// Whether any move is still possible.
///
/// True if a cell is empty or two orthogonally adjacent tiles can merge.
/// False exactly when the game is lost.
#[must_use]
pub fn has_legal_move(grid: &Grid) -> bool {
    if !grid.is_full() {
        return true;
    }
    grid.tiles().any(|(coord, tile)| {
        Direction::ALL.iter().any(|&dir| {
            grid.step(coord, dir)
                .and_then(|next| grid.at(next))
                .is_some_and(|other| other.merges_with(tile))
        })
    })
}

/// Whether any tile has reached `threshold`.
#[must_use]
pub fn has_won(grid: &Grid, threshold: u32) -> bool {
    grid.tiles().any(|(_, tile)| tile.value >= threshold)
}

/// Whether moving in `direction` would change the grid.
///
/// A move changes the grid iff some tile has, one step along the direction,
/// an empty cell or a tile it can merge with.
#[must_use]
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    grid.tiles().any(|(coord, tile)| {
        grid.step(coord, direction)
            .is_some_and(|next| grid.at(next).is_none_or(|other| other.merges_with(tile)))
    })
}

/// Directions that would change the grid, in [`Direction::ALL`] order.
#[must_use]
pub fn legal_directions(grid: &Grid) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&dir| can_move(grid, dir))
        .collect()
}
