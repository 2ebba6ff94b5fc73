//! Tournament command implementation.

use super::output::{
    format_tournament_csv, format_tournament_text, JsonTournamentResult, TournamentStats,
};
use super::{CliError, RulesArgs, StrategyArg, TournamentFormat};
use indicatif::{ProgressBar, ProgressStyle};
use merge1024::autoplay::{play_game, Strategy};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the rules are invalid or output fails.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    rules: &RulesArgs,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    strategy: StrategyArg,
    max_moves: u64,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = rules.resolve()?;
    let strategy = Strategy::from(strategy);

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = super::seed_or_now(seed);
    tracing::info!(games, base_seed, ?strategy, "tournament started");

    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .map_err(|e| CliError::new(format!("invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread folds into its own stats; merged once at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(TournamentStats::default, |mut local, i| {
            let game_seed = base_seed.wrapping_add(i);
            match play_game(game_seed, strategy, &config, max_moves) {
                Ok(result) => local.add_result(&result),
                Err(e) => tracing::warn!(game_seed, error = %e, "game failed"),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(TournamentStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };
    tracing::info!(
        games = stats.games_played,
        wins = stats.wins,
        elapsed_ms = duration.as_millis(),
        "tournament finished"
    );

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, strategy));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        TournamentFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonTournamentResult::from_stats(
                &stats, strategy,
            ))?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats));
        }
    }

    Ok(())
}
