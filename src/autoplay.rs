//! Headless play: simple move strategies and a seeded full-game runner.
//!
//! Used by the CLI `auto` and `tournament` commands, the benches, and the
//! integration tests. A game is fully determined by its seed, strategy and
//! configuration.

use crate::config::GameConfig;
use crate::error::Result;
use crate::game::{
    legal_directions, resolve, Direction, GameSession, GameStatus, Grid, MoveOutcome,
    RandomSource, SeededRandom, TileIds,
};
use serde::Serialize;

/// Salt separating the strategy's random stream from the spawn stream.
const STRATEGY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// How the autoplayer chooses its next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Uniformly random legal direction.
    Random,
    /// Largest immediate score, then most empty cells.
    Greedy,
    /// First legal of left, down, right, up.
    Corner,
}

impl Strategy {
    /// Corner strategy preference order.
    const CORNER_ORDER: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    /// Pick a direction for `grid`, or `None` if no move is legal.
    pub fn choose<R: RandomSource + ?Sized>(
        self,
        grid: &Grid,
        win_value: u32,
        rng: &mut R,
    ) -> Option<Direction> {
        let legal = legal_directions(grid);
        if legal.is_empty() {
            return None;
        }
        match self {
            Strategy::Random => Some(legal[rng.pick_index(legal.len())]),
            Strategy::Greedy => greedy(grid, &legal, win_value),
            Strategy::Corner => Self::CORNER_ORDER
                .into_iter()
                .find(|dir| legal.contains(dir)),
        }
    }
}

fn greedy(grid: &Grid, legal: &[Direction], win_value: u32) -> Option<Direction> {
    let mut scratch = TileIds::following(grid);
    let mut best: Option<(Direction, (u64, usize))> = None;
    for &dir in legal {
        let res = resolve(grid, dir, &mut scratch, win_value);
        let key = (res.score_delta, res.grid.empty_cells().len());
        if best.is_none_or(|(_, best_key)| key > best_key) {
            best = Some((dir, key));
        }
    }
    best.map(|(dir, _)| dir)
}

/// Summary of one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// Seed the game was played with.
    pub seed: u64,
    /// Strategy that played it.
    pub strategy: Strategy,
    /// Final score.
    pub score: u64,
    /// Largest tile reached.
    pub max_tile: u32,
    /// Accepted moves.
    pub moves: u64,
    /// Whether the win value was reached.
    pub won: bool,
    /// Final status.
    pub status: GameStatus,
}

/// Play one game to completion.
///
/// Play continues past a win. The game stops when it is lost or after
/// `max_moves` accepted moves.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn play_game(
    seed: u64,
    strategy: Strategy,
    config: &GameConfig,
    max_moves: u64,
) -> Result<GameResult> {
    play_game_with(seed, strategy, config, max_moves, |_, _| {})
}

/// Like [`play_game`], calling `on_move` after every accepted move.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn play_game_with<F>(
    seed: u64,
    strategy: Strategy,
    config: &GameConfig,
    max_moves: u64,
    mut on_move: F,
) -> Result<GameResult>
where
    F: FnMut(Direction, &MoveOutcome),
{
    let mut session = GameSession::seeded(*config, seed)?;
    let mut chooser = SeededRandom::new(seed ^ STRATEGY_SEED_SALT);
    let mut won = false;

    while session.moves() < max_moves {
        if session.status() == GameStatus::Won {
            won = true;
            session.keep_playing();
        }
        if !session.status().accepts_moves() {
            break;
        }
        let Some(dir) = strategy.choose(session.grid(), config.win_value, &mut chooser) else {
            break;
        };
        let outcome = session.apply_move(dir);
        on_move(dir, &outcome);
    }

    let status = session.status();
    Ok(GameResult {
        seed,
        strategy,
        score: session.score(),
        max_tile: session.max_tile(),
        moves: session.moves(),
        won: won || status.has_won(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ScriptedRandom;

    fn grid(rows: &[[u32; 4]; 4]) -> Grid {
        Grid::from_rows(rows, &mut TileIds::new()).unwrap()
    }

    #[test]
    fn test_greedy_prefers_merge() {
        let g = grid(&[[2, 0, 0, 2], [4, 0, 0, 0], [0; 4], [0; 4]]);
        let dir = Strategy::Greedy.choose(&g, 1024, &mut ScriptedRandom::default());
        assert!(matches!(dir, Some(Direction::Left | Direction::Right)));
    }

    #[test]
    fn test_corner_order() {
        let g = grid(&[[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        let dir = Strategy::Corner.choose(&g, 1024, &mut ScriptedRandom::default());
        assert_eq!(dir, Some(Direction::Down));
    }

    #[test]
    fn test_no_choice_when_lost() {
        let g = grid(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        for strategy in [Strategy::Random, Strategy::Greedy, Strategy::Corner] {
            assert_eq!(strategy.choose(&g, 1024, &mut ScriptedRandom::default()), None);
        }
    }

    #[test]
    fn test_play_game_deterministic() {
        let config = GameConfig::default();
        let a = play_game(99, Strategy::Random, &config, 10_000).unwrap();
        let b = play_game(99, Strategy::Random, &config, 10_000).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.status, GameStatus::Lost);
        assert!(a.moves > 0);
    }

    #[test]
    fn test_move_limit() {
        let config = GameConfig::default();
        let result = play_game(5, Strategy::Corner, &config, 3).unwrap();
        assert_eq!(result.moves, 3);
    }

    #[test]
    fn test_small_win_value_is_reached() {
        let config = GameConfig {
            win_value: 8,
            ..GameConfig::default()
        };
        let result = play_game(1, Strategy::Greedy, &config, 10_000).unwrap();
        assert!(result.won);
        assert!(result.max_tile >= 8);
    }
}
