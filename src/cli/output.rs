//! Output formatting utilities for CLI.

// Averages over game counts are reported as floats
#![allow(clippy::cast_precision_loss)]

use merge1024::autoplay::{GameResult, Strategy};
use merge1024::GameStatus;
use serde::Serialize;
use std::collections::BTreeMap;

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Random seed used.
    seed: u64,
    /// Strategy that played.
    strategy: Strategy,
    /// Final score.
    score: u64,
    /// Largest tile reached.
    max_tile: u32,
    /// Accepted moves.
    moves: u64,
    /// Whether the win value was reached.
    won: bool,
    /// Final status.
    status: GameStatus,
    /// Final board, row-major, 0 for empty.
    board: Vec<Vec<u32>>,
}

impl JsonGameResult {
    /// Create from a game result and its final board.
    pub(super) fn new(result: &GameResult, board: Vec<Vec<u32>>) -> Self {
        Self {
            seed: result.seed,
            strategy: result.strategy,
            score: result.score,
            max_tile: result.max_tile,
            moves: result.moves,
            won: result.won,
            status: result.status,
            board,
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {})\n", result.seed));
    output.push_str(&format!("  Strategy: {:?}\n", result.strategy));
    output.push_str(&format!("  Status:   {}\n", result.status));
    output.push_str(&format!("  Score:    {}\n", result.score));
    output.push_str(&format!("  Max tile: {}\n", result.max_tile));
    output.push_str(&format!("  Moves:    {}\n", result.moves));
    if result.won {
        output.push_str("  Reached the win tile\n");
    }

    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct TournamentStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games that reached the win value.
    pub(super) wins: u64,
    /// Total score.
    total_score: f64,
    /// Score sum of squares for std dev calculation.
    score_sq_sum: f64,
    /// Total accepted moves across all games.
    total_moves: u64,
    /// Highest single-game score.
    best_score: u64,
    /// Games per final max tile.
    max_tiles: BTreeMap<u32, u64>,
}

impl TournamentStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_moves += result.moves;
        if result.won {
            self.wins += 1;
        }
        let score = result.score as f64;
        self.total_score += score;
        self.score_sq_sum += score * score;
        self.best_score = self.best_score.max(result.score);
        *self.max_tiles.entry(result.max_tile).or_insert(0) += 1;
    }

    /// Fold another thread's stats into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.wins += other.wins;
        self.total_score += other.total_score;
        self.score_sq_sum += other.score_sq_sum;
        self.total_moves += other.total_moves;
        self.best_score = self.best_score.max(other.best_score);
        for (&tile, &count) in &other.max_tiles {
            *self.max_tiles.entry(tile).or_insert(0) += count;
        }
    }

    /// Fraction of games that reached the win value (0.0-1.0).
    pub(super) fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games_played as f64
    }

    /// Average final score.
    pub(super) fn avg_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_score / self.games_played as f64
    }

    /// Final score standard deviation.
    pub(super) fn score_std_dev(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.avg_score();
        let variance = (self.score_sq_sum / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Average game length in moves.
    pub(super) fn avg_moves(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games_played as f64
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Strategy that played every game.
    strategy: Strategy,
    /// Total games played.
    games_played: u64,
    /// Games that reached the win value.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average score.
    avg_score: f64,
    /// Score standard deviation.
    score_std_dev: f64,
    /// Highest single-game score.
    best_score: u64,
    /// Average game length in moves.
    avg_moves: f64,
    /// Games per final max tile, keyed by tile value.
    max_tiles: BTreeMap<u32, u64>,
}

impl JsonTournamentResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &TournamentStats, strategy: Strategy) -> Self {
        Self {
            strategy,
            games_played: stats.games_played,
            wins: stats.wins,
            win_rate: stats.win_rate(),
            avg_score: stats.avg_score(),
            score_std_dev: stats.score_std_dev(),
            best_score: stats.best_score,
            avg_moves: stats.avg_moves(),
            max_tiles: stats.max_tiles.clone(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, strategy: Strategy) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Tournament Results ({} games, {strategy:?})\n",
        stats.games_played
    ));
    output.push_str("========================================\n\n");

    output.push_str(&format!(
        "Win rate:   {:.1}% ({} wins)\n",
        stats.win_rate() * 100.0,
        stats.wins
    ));
    output.push_str(&format!(
        "Avg score:  {:.1} (+/- {:.1})\n",
        stats.avg_score(),
        stats.score_std_dev()
    ));
    output.push_str(&format!("Best score: {}\n", stats.best_score));
    output.push_str(&format!("Avg length: {:.0} moves\n\n", stats.avg_moves()));

    output.push_str("Max tile reached:\n");
    for (tile, count) in stats.max_tiles.iter().rev() {
        let share = *count as f64 / stats.games_played.max(1) as f64 * 100.0;
        output.push_str(&format!("  {tile:>6}: {count} ({share:.1}%)\n"));
    }

    output
}

/// Format tournament stats as CSV, one row per max tile.
pub(super) fn format_tournament_csv(stats: &TournamentStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("max_tile,games,share\n");

    for (tile, count) in &stats.max_tiles {
        let share = *count as f64 / stats.games_played.max(1) as f64;
        output.push_str(&format!("{tile},{count},{share:.4}\n"));
    }

    output
}
