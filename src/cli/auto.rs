//! Auto command implementation.

use super::output::{format_text, JsonGameResult};
use super::{CliError, OutputFormat, RulesArgs, StrategyArg};
use merge1024::autoplay::play_game_with;
use merge1024::Grid;

/// Execute the auto command.
///
/// # Errors
///
/// Returns an error if the rules are invalid or output fails.
pub(crate) fn execute(
    rules: &RulesArgs,
    seed: Option<u64>,
    strategy: StrategyArg,
    max_moves: u64,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let config = rules.resolve()?;
    let seed = super::seed_or_now(seed);
    let verbose = !quiet && format == OutputFormat::Text;

    if verbose {
        println!("Playing {0}x{0} to {1} with seed {seed}...", config.size, config.win_value);
        println!();
    }

    let mut last_grid: Option<Grid> = None;
    let mut move_no = 0u64;
    let result = play_game_with(seed, strategy.into(), &config, max_moves, |dir, outcome| {
        if !outcome.accepted {
            return;
        }
        move_no += 1;
        if verbose {
            println!(
                "{move_no:>5}  {:<5}  +{:<5} score {:<7} {}",
                dir.to_string(),
                outcome.score_delta,
                outcome.score,
                outcome.status
            );
        }
        last_grid = Some(outcome.grid.clone());
    })?;

    match format {
        OutputFormat::Text => {
            if let Some(grid) = &last_grid {
                println!();
                print!("{grid}");
                println!();
            }
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let board = last_grid.map(|grid| grid.values()).unwrap_or_default();
            let json = serde_json::to_string_pretty(&JsonGameResult::new(&result, board))?;
            println!("{json}");
        }
    }

    Ok(())
}
