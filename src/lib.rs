// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! merge1024: a deterministic sliding-tile merge puzzle engine.
//!
//! All tiles slide in the chosen direction; equal tiles that collide merge
//! into one of double value, at most once per tile per move; a new tile
//! spawns after every move that changed the board. The game is won when a
//! merge creates the win value (1024 by default) and lost when no move is
//! left.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Renderer / input (CLI, TUI)       │
//! ├─────────────────────────────────────┤
//! │   GameSession (score, status)       │
//! ├─────────────────────────────────────┤
//! │   resolve · terminal · spawn        │
//! ├─────────────────────────────────────┤
//! │   Grid · Tile · Direction           │
//! └─────────────────────────────────────┘
//! ```
//!
//! Randomness and best-score persistence are injected, so a session is fully
//! reproducible from a seed:
//!
//! ```
//! use merge1024::{Direction, GameConfig, GameSession};
//!
//! let mut session = GameSession::seeded(GameConfig::default(), 42)?;
//! let outcome = session.apply_move(Direction::Left);
//! assert_eq!(outcome.score, session.score());
//! # Ok::<(), merge1024::EngineError>(())
//! ```

pub mod autoplay;
pub mod config;
pub mod error;
pub mod game;
pub mod store;

pub use config::GameConfig;
pub use error::{EngineError, Result};

// Re-export key game types at crate root for convenience
pub use game::{
    Coord, Direction, GameSession, GameStatus, Grid, MoveEffect, MoveOutcome, Tile, TileId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_drive_a_game() {
        let mut session = GameSession::seeded(GameConfig::default(), 7).unwrap();
        let start = session.grid().tile_count();
        let accepted = Direction::ALL
            .into_iter()
            .map(|dir| session.apply_move(dir))
            .filter(|outcome| outcome.accepted)
            .count();
        assert!(accepted > 0);
        assert!(session.grid().tile_count() >= start);
        let debug = format!("{:?}", session.status());
        assert!(!debug.is_empty());
    }
}
