//! merge1024 CLI - play the sliding-tile merge puzzle or run it headless.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// merge1024 - A deterministic sliding-tile merge puzzle
#[derive(Parser, Debug)]
#[command(name = "merge1024")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        #[command(flatten)]
        rules: cli::RulesArgs,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON file holding the best score across sessions
        #[arg(long)]
        best: Option<PathBuf>,

        /// Log filter, e.g. `info` or `merge1024=debug`
        #[arg(long, default_value = "info")]
        log: String,

        /// Write logs to this file (the TUI owns the terminal)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Play one game with a built-in strategy
    Auto {
        #[command(flatten)]
        rules: cli::RulesArgs,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Move strategy
        #[arg(long, default_value = "greedy")]
        strategy: cli::StrategyArg,

        /// Stop after this many accepted moves (default: 100000)
        #[arg(short = 'm', long, default_value = "100000")]
        max_moves: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress move-by-move output
        #[arg(short, long)]
        quiet: bool,

        /// Log filter written to stderr
        #[arg(long, default_value = "warn")]
        log: String,
    },

    /// Run many seeded games in parallel and aggregate statistics
    Tournament {
        #[command(flatten)]
        rules: cli::RulesArgs,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Move strategy
        #[arg(long, default_value = "greedy")]
        strategy: cli::StrategyArg,

        /// Maximum accepted moves per game (default: 100000)
        #[arg(short = 'm', long, default_value = "100000")]
        max_moves: u64,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,

        /// Log filter written to stderr
        #[arg(long, default_value = "warn")]
        log: String,
    },
}

fn run(command: Commands) -> Result<(), cli::CliError> {
    match command {
        Commands::Play {
            rules,
            seed,
            best,
            log,
            log_file,
        } => {
            if let Some(path) = &log_file {
                cli::init_file_logging(&log, path)?;
            }
            cli::play::execute(&rules, seed, best)
        }

        Commands::Auto {
            rules,
            seed,
            strategy,
            max_moves,
            format,
            quiet,
            log,
        } => {
            cli::init_logging(&log)?;
            cli::auto::execute(&rules, seed, strategy, max_moves, format, quiet)
        }

        Commands::Tournament {
            rules,
            games,
            seed,
            threads,
            strategy,
            max_moves,
            format,
            progress,
            log,
        } => {
            cli::init_logging(&log)?;
            cli::tournament::execute(
                &rules, games, seed, threads, strategy, max_moves, format, progress,
            )
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
