//! Game session: the sole owner and mutator of grid, score and status.

use crate::config::GameConfig;
use crate::error::{EngineError, Result};
use crate::game::invariants::assert_invariants;
use crate::game::{
    has_legal_move, has_won, resolve, spawn_random_tile, Direction, Grid, MoveEffect, RandomSource,
    Resolution, SeededRandom, TileIds,
};
use crate::store::{BestScoreStore, MemoryStore};
use serde::Serialize;
use std::fmt;

/// Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Moves are accepted.
    Playing,
    /// The win value was reached; moves are ignored until the player chooses
    /// to keep playing.
    Won,
    /// Play continues after a win.
    WonContinuing,
    /// No legal move remains.
    Lost,
}

impl GameStatus {
    /// Whether `apply_move` will resolve moves in this state.
    #[must_use]
    pub const fn accepts_moves(self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::WonContinuing)
    }

    /// Whether the win value has been reached this game.
    #[must_use]
    pub const fn has_won(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::WonContinuing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::WonContinuing => "won (continuing)",
            GameStatus::Lost => "lost",
        };
        f.write_str(text)
    }
}

/// What a call to [`GameSession::apply_move`] produced.
#[derive(Debug, Clone, Serialize)]
pub struct MoveOutcome {
    /// Whether the move changed the grid. Rejected moves change nothing.
    pub accepted: bool,
    /// Grid after the move, including the spawned tile.
    pub grid: Grid,
    /// Slides, merges and the spawn, in order.
    pub effects: Vec<MoveEffect>,
    /// Points gained by this move.
    pub score_delta: u64,
    /// Running score.
    pub score: u64,
    /// Best score, including this game.
    pub best: u64,
    /// Status after the move.
    pub status: GameStatus,
}

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Current grid.
    pub grid: Grid,
    /// Running score.
    pub score: u64,
    /// Best score.
    pub best: u64,
    /// Current status.
    pub status: GameStatus,
    /// Accepted moves this game.
    pub moves: u64,
}

/// A single-player game.
///
/// Not reentrant: each call runs to completion before the next one.
#[derive(Debug)]
pub struct GameSession<R = SeededRandom, S = MemoryStore> {
    config: GameConfig,
    grid: Grid,
    score: u64,
    best: u64,
    status: GameStatus,
    moves: u64,
    ids: TileIds,
    rng: R,
    store: S,
}

impl GameSession<SeededRandom, MemoryStore> {
    /// Start a reproducible game with an in-memory best score.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, SeededRandom::new(seed), MemoryStore::default())
    }
}

impl<R: RandomSource, S: BestScoreStore> GameSession<R, S> {
    /// Start a new game seeded with two random tiles.
    ///
    /// The best score is read from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: GameConfig, rng: R, store: S) -> Result<Self> {
        config.validate()?;
        let mut session = Self {
            config,
            grid: config.empty_grid()?,
            score: 0,
            best: store.load(),
            status: GameStatus::Playing,
            moves: 0,
            ids: TileIds::new(),
            rng,
            store,
        };
        session.new_game();
        Ok(session)
    }

    /// Resume play from a prepared grid with score 0.
    ///
    /// The status is `Lost` if the grid admits no move, `WonContinuing` if a
    /// tile already holds the win value or more, otherwise `Playing`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or disagrees with the grid size.
    pub fn from_grid(config: GameConfig, grid: Grid, rng: R, store: S) -> Result<Self> {
        config.validate()?;
        if grid.size() != config.size {
            return Err(EngineError::InvalidGridSize { size: grid.size() });
        }
        let status = if !has_legal_move(&grid) {
            GameStatus::Lost
        } else if has_won(&grid, config.win_value) {
            GameStatus::WonContinuing
        } else {
            GameStatus::Playing
        };
        Ok(Self {
            config,
            ids: TileIds::following(&grid),
            grid,
            score: 0,
            best: store.load(),
            status,
            moves: 0,
            rng,
            store,
        })
    }

    /// Discard the current game and start over with two random tiles.
    pub fn new_game(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.moves = 0;
        self.status = GameStatus::Playing;
        for _ in 0..2 {
            spawn_random_tile(
                &mut self.grid,
                &mut self.rng,
                &mut self.ids,
                self.config.four_probability,
            );
        }
        tracing::info!(size = self.config.size, best = self.best, "new game");
    }

    /// Apply a move.
    ///
    /// Ignored in `Won` and `Lost`, and a no-op when nothing would slide or
    /// merge. Otherwise the resolved grid is committed, the score and best
    /// score updated, one tile spawned, and the status advanced.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if !self.status.accepts_moves() {
            tracing::trace!(%direction, status = %self.status, "move ignored");
            return self.rejected();
        }

        let Resolution {
            mut grid,
            mut effects,
            score_delta,
            moved,
            reached_win,
        } = resolve(&self.grid, direction, &mut self.ids, self.config.win_value);

        if !moved {
            tracing::trace!(%direction, "move changes nothing");
            return self.rejected();
        }

        let changes = effects.len();
        if let Some((at, tile)) = spawn_random_tile(
            &mut grid,
            &mut self.rng,
            &mut self.ids,
            self.config.four_probability,
        ) {
            effects.push(MoveEffect::Spawned { tile, at });
        }
        assert_invariants(&grid, &effects);

        self.grid = grid;
        self.score += score_delta;
        self.moves += 1;
        self.record_best();

        if reached_win && self.status == GameStatus::Playing {
            self.status = GameStatus::Won;
            tracing::info!(score = self.score, moves = self.moves, "won");
        } else if !has_legal_move(&self.grid) {
            self.status = GameStatus::Lost;
            tracing::info!(score = self.score, moves = self.moves, "lost");
        }

        tracing::debug!(
            %direction,
            score_delta,
            changes,
            score = self.score,
            status = %self.status,
            "move applied"
        );

        MoveOutcome {
            accepted: true,
            grid: self.grid.clone(),
            effects,
            score_delta,
            score: self.score,
            best: self.best,
            status: self.status,
        }
    }

    /// Apply a move given as a numeric code (0 up, 1 right, 2 down, 3 left).
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::InvalidDirection`] for codes above 3.
    pub fn apply_move_code(&mut self, code: u8) -> Result<MoveOutcome> {
        let direction = Direction::try_from(code)?;
        Ok(self.apply_move(direction))
    }

    /// Continue past a win.
    ///
    /// Only valid from `Won`; returns whether the transition happened. If the
    /// winning board has no legal move the game is lost straight away.
    pub fn keep_playing(&mut self) -> bool {
        if self.status != GameStatus::Won {
            return false;
        }
        self.status = if has_legal_move(&self.grid) {
            GameStatus::WonContinuing
        } else {
            GameStatus::Lost
        };
        tracing::info!(status = %self.status, "keep playing");
        true
    }

    /// Current grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Running score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Best score across games.
    #[must_use]
    pub const fn best(&self) -> u64 {
        self.best
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Rules in force.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Accepted moves this game.
    #[must_use]
    pub const fn moves(&self) -> u64 {
        self.moves
    }

    /// Largest tile on the board.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.grid.max_value()
    }

    /// Best-score store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Owned copy of the renderable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            score: self.score,
            best: self.best,
            status: self.status,
            moves: self.moves,
        }
    }

    fn record_best(&mut self) {
        if self.score <= self.best {
            return;
        }
        self.best = self.score;
        if let Err(e) = self.store.save(self.best) {
            tracing::warn!(error = %e, best = self.best, "failed to persist best score");
        }
    }

    fn rejected(&self) -> MoveOutcome {
        MoveOutcome {
            accepted: false,
            grid: self.grid.clone(),
            effects: Vec::new(),
            score_delta: 0,
            score: self.score,
            best: self.best,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coord, ScriptedRandom};

    fn scripted_session(
        rows: &[[u32; 4]; 4],
        rng: ScriptedRandom,
    ) -> GameSession<ScriptedRandom, MemoryStore> {
        let grid = Grid::from_rows(rows, &mut TileIds::new()).unwrap();
        GameSession::from_grid(GameConfig::default(), grid, rng, MemoryStore::default()).unwrap()
    }

    fn session_from(rows: &[[u32; 4]; 4]) -> GameSession<ScriptedRandom, MemoryStore> {
        scripted_session(rows, ScriptedRandom::default())
    }

    #[test]
    fn test_new_game_seeds_two_tiles() {
        let session = GameSession::seeded(GameConfig::default(), 42).unwrap();
        assert_eq!(session.grid().tile_count(), 2);
        assert_eq!(session.score(), 0);
        assert_eq!(session.status(), GameStatus::Playing);
        for (_, tile) in session.grid().tiles() {
            assert!(tile.value == 2 || tile.value == 4);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            size: 1,
            ..GameConfig::default()
        };
        assert!(GameSession::seeded(config, 1).is_err());
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut session = session_from(&[[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = session.grid().clone();
        let outcome = session.apply_move(Direction::Left);
        assert!(!outcome.accepted);
        assert!(outcome.effects.is_empty());
        assert_eq!(session.grid(), &before);
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_accepted_move_scores_and_spawns() {
        let mut session = session_from(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = session.apply_move(Direction::Left);
        assert!(outcome.accepted);
        assert_eq!(outcome.score_delta, 4);
        assert_eq!(session.score(), 4);
        assert_eq!(session.best(), 4);
        assert_eq!(session.grid().tile_count(), 2);
        assert!(matches!(
            outcome.effects.last(),
            Some(MoveEffect::Spawned { .. })
        ));
        // Scripted source picks the first empty cell, value 2.
        assert_eq!(session.grid().values()[0], vec![4, 2, 0, 0]);
    }

    #[test]
    fn test_win_transition_and_keep_playing() {
        let mut session = session_from(&[[512, 512, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = session.apply_move(Direction::Left);
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(session.grid().at(Coord::new(0, 0)).unwrap().value, 1024);

        let ignored = session.apply_move(Direction::Right);
        assert!(!ignored.accepted);

        assert!(session.keep_playing());
        assert_eq!(session.status(), GameStatus::WonContinuing);
        assert!(!session.keep_playing());
        assert!(session.apply_move(Direction::Right).accepted);
    }

    #[test]
    fn test_no_second_win_after_continuing() {
        let mut session = session_from(&[[512, 512, 0, 0], [512, 512, 0, 0], [0; 4], [0; 4]]);
        session.apply_move(Direction::Left);
        assert_eq!(session.status(), GameStatus::Won);
        assert!(session.keep_playing());
        // Column 0 now holds 1024 above 1024.
        let outcome = session.apply_move(Direction::Up);
        assert!(outcome.accepted);
        assert_eq!(session.status(), GameStatus::WonContinuing);
        assert_eq!(session.max_tile(), 2048);
    }

    #[test]
    fn test_spawn_next_to_equal_keeps_playing() {
        let mut session = session_from(&[[4, 8, 4, 8], [8, 4, 8, 4], [4, 8, 4, 8], [8, 4, 0, 2]]);
        let outcome = session.apply_move(Direction::Left);
        assert!(outcome.accepted);
        assert_eq!(session.grid().values()[3], vec![8, 4, 2, 2]);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn test_loss_detected_after_spawn() {
        // The only move fills the last hole; a spawned 4 matches nothing.
        let mut session = scripted_session(
            &[[4, 8, 4, 8], [8, 4, 8, 4], [4, 8, 4, 8], [8, 4, 0, 2]],
            ScriptedRandom::new([0], [0.95]),
        );
        let outcome = session.apply_move(Direction::Left);
        assert!(outcome.accepted);
        assert_eq!(session.grid().values()[3], vec![8, 4, 2, 4]);
        assert_eq!(outcome.status, GameStatus::Lost);
        assert!(!session.apply_move(Direction::Right).accepted);
    }

    #[test]
    fn test_lost_session_ignores_moves() {
        let mut session = session_from(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert_eq!(session.status(), GameStatus::Lost);
        for dir in Direction::ALL {
            assert!(!session.apply_move(dir).accepted);
        }
        assert!(!session.keep_playing());
    }

    #[test]
    fn test_move_code_validation() {
        let mut session = session_from(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(session.apply_move_code(9).is_err());
        assert!(session.apply_move_code(3).unwrap().accepted);
    }

    #[test]
    fn test_new_game_resets_but_keeps_best() {
        let mut session = GameSession::seeded(GameConfig::default(), 3).unwrap();
        for &dir in Direction::ALL.iter().cycle().take(1000) {
            if session.score() > 0 {
                break;
            }
            session.apply_move(dir);
        }
        let best = session.best();
        assert!(best > 0);
        session.new_game();
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.best(), best);
        assert_eq!(session.grid().tile_count(), 2);
    }

    #[test]
    fn test_best_score_loaded_from_store() {
        let session = GameSession::new(
            GameConfig::default(),
            SeededRandom::new(1),
            MemoryStore::new(5000),
        )
        .unwrap();
        assert_eq!(session.best(), 5000);
        assert_eq!(session.snapshot().best, 5000);
    }

    #[test]
    fn test_win_and_loss_on_same_move() {
        // Left merges the 512s and the spawned 4 fills the last hole.
        let mut session = scripted_session(
            &[
                [512, 512, 8, 16],
                [32, 64, 128, 256],
                [8, 16, 32, 64],
                [128, 256, 2, 4],
            ],
            ScriptedRandom::new([0], [0.95]),
        );
        let outcome = session.apply_move(Direction::Left);
        assert!(outcome.accepted);
        assert_eq!(session.grid().values()[0], vec![1024, 8, 16, 4]);
        assert!(!has_legal_move(session.grid()));
        assert_eq!(outcome.status, GameStatus::Won);

        assert!(session.keep_playing());
        assert_eq!(session.status(), GameStatus::Lost);
        assert!(!session.keep_playing());
        for dir in Direction::ALL {
            assert!(!session.apply_move(dir).accepted);
        }
    }

    #[test]
    fn test_resumed_grid_past_win_value_continues() {
        let session = session_from(&[[1024, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(session.status(), GameStatus::WonContinuing);

        let mut session = session_from(&[[1024, 512, 512, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = session.apply_move(Direction::Left);
        assert!(outcome.accepted);
        assert_eq!(outcome.status, GameStatus::WonContinuing);
    }
}
