//! The grid transition engine.
//!
//! - Grid and tiles with stable identity
//! - Move resolution (traversal order, sliding, merge-once-per-move)
//! - Terminal detection (win, no legal move)
//! - Random spawning behind an injectable source
//! - The game session state machine

mod direction;
mod grid;
mod invariants;
mod random;
mod resolver;
mod session;
mod terminal;
mod tile;

pub use direction::Direction;
pub use grid::{Coord, Grid, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use invariants::{assert_invariants, check_effects, check_invariants, InvariantViolation};
pub use random::{spawn_random_tile, RandomSource, ScriptedRandom, SeededRandom};
pub use resolver::{find_farthest, resolve, MoveEffect, Resolution, Traversal};
pub use session::{GameSession, GameStatus, MoveOutcome, Snapshot};
pub use terminal::{can_move, has_legal_move, has_won, legal_directions};
pub use tile::{is_tile_value, Tile, TileId, TileIds, MAX_TILE_VALUE};
