//! Game invariants - sanity checks that detect bugs.
//!
//! These should never trigger on a grid produced by the engine. If they do,
//! the resolver or the session has a bug.

use crate::game::{is_tile_value, Grid, MoveEffect, TileId};
use std::collections::HashSet;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check grid invariants.
///
/// Every value must be a power of two >= 2 and no tile id may occupy two
/// cells. Returns the violations found, empty if all hold.
#[must_use]
pub fn check_invariants(grid: &Grid) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen: HashSet<TileId> = HashSet::new();

    for (coord, tile) in grid.tiles() {
        if !is_tile_value(tile.value) {
            violations.push(InvariantViolation {
                message: format!("Tile {} at {coord} has invalid value {}", tile.id, tile.value),
            });
        }
        if !seen.insert(tile.id) {
            violations.push(InvariantViolation {
                message: format!(
                    "Tile {} appears in more than one cell (again at {coord})",
                    tile.id
                ),
            });
        }
    }

    violations
}

/// Check that no tile took part in more than one merge of a move.
#[must_use]
pub fn check_effects(effects: &[MoveEffect]) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut sources: HashSet<TileId> = HashSet::new();

    for effect in effects {
        let MoveEffect::Merged { tile, into, .. } = effect else {
            continue;
        };
        for source in tile.merged_from.into_iter().flatten() {
            if !sources.insert(source) {
                violations.push(InvariantViolation {
                    message: format!("Tile {source} merged twice (second merge into {into})"),
                });
            }
        }
    }

    violations
}

/// Assert all invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(grid: &Grid, effects: &[MoveEffect]) {
    let mut violations = check_invariants(grid);
    violations.extend(check_effects(effects));
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_grid: &Grid, _effects: &[MoveEffect]) {}
