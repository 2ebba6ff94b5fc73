//! Tiles and tile identity.

use crate::error::{EngineError, Result};
use crate::game::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque tile identifier, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(u64);

impl TileId {
    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic tile id generator.
///
/// Handed to every operation that creates tiles so that a session (or a test)
/// controls identity and stays deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileIds {
    next: u64,
}

impl TileIds {
    /// Start counting from zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Continue counting from `next`.
    #[must_use]
    pub const fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// First id guaranteed not to collide with any tile on `grid`.
    #[must_use]
    pub fn following(grid: &Grid) -> Self {
        let next = grid.tiles().map(|(_, tile)| tile.id.get() + 1).max().unwrap_or(0);
        Self { next }
    }

    /// Allocate a fresh id.
    pub fn allocate(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }

    /// Raw value the next allocation will use.
    #[must_use]
    pub const fn peek_next(&self) -> u64 {
        self.next
    }
}

/// A numbered piece on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Power-of-two value, at least 2.
    pub value: u32,
    /// Identity; stable while the tile only slides.
    pub id: TileId,
    /// Ids of the moving and target tiles this tile was merged from.
    ///
    /// Only set during the move that created it.
    pub merged_from: Option<[TileId; 2]>,
}

impl Tile {
    /// Create a fresh tile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTileValue`] unless `value` is a power of
    /// two >= 2.
    pub fn new(value: u32, ids: &mut TileIds) -> Result<Self> {
        if !is_tile_value(value) {
            return Err(EngineError::InvalidTileValue { value });
        }
        Ok(Self {
            value,
            id: ids.allocate(),
            merged_from: None,
        })
    }

    /// Whether `self` and `other` may merge: equal values whose double is
    /// still a tile value.
    #[must_use]
    pub const fn merges_with(&self, other: &Tile) -> bool {
        self.value == other.value && self.value <= MAX_TILE_VALUE / 2
    }

    /// Merge `moving` into `target`, producing a new tile of double value.
    ///
    /// Callers check [`Tile::merges_with`] first.
    pub(crate) fn merged(moving: &Tile, target: &Tile, ids: &mut TileIds) -> Self {
        debug_assert!(moving.merges_with(target));
        Self {
            value: moving.value * 2,
            id: ids.allocate(),
            merged_from: Some([moving.id, target.id]),
        }
    }

    /// Whether this tile was produced by a merge during the current move.
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }
}

/// Largest representable tile value. Two tiles of this value never merge.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Whether `value` may appear on a tile.
#[must_use]
pub const fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}
