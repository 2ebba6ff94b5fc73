//! CLI command implementations for merge1024.

pub(crate) mod auto;
pub(crate) mod play;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use merge1024::autoplay::Strategy;
use merge1024::config::ConfigError;
use merge1024::{EngineError, GameConfig};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Rule options shared by every command.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RulesArgs {
    /// JSON rules file (fields: size, win_value, four_probability)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Board side length (default: 4)
    #[arg(long)]
    pub(crate) size: Option<usize>,

    /// Tile value that wins the game (default: 1024)
    #[arg(long)]
    pub(crate) win: Option<u32>,
}

impl RulesArgs {
    /// Build the game configuration: defaults, then the file, then flags.
    pub(crate) fn resolve(&self) -> Result<GameConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(win) = self.win {
            config.win_value = win;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Move strategy for headless commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StrategyArg {
    /// Uniformly random legal move.
    Random,
    /// Best immediate score.
    Greedy,
    /// Keep tiles in the bottom-left corner.
    Corner,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => Strategy::Random,
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::Corner => Strategy::Corner,
        }
    }
}

/// Output format for the `auto` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Use the given seed or derive one from the clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seed_or_now(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// Install a stderr `tracing` subscriber with the given filter.
pub(crate) fn init_logging(filter: &str) -> Result<(), CliError> {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|e| CliError::new(format!("invalid log filter: {e}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::new(e.to_string()))
}

/// Install a `tracing` subscriber appending to `path`.
///
/// Used by the TUI, where stderr output would corrupt the screen.
pub(crate) fn init_file_logging(filter: &str, path: &std::path::Path) -> Result<(), CliError> {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|e| CliError::new(format!("invalid log filter: {e}")))?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::new(format!("Failed to open {}: {e}", path.display())))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| CliError::new(e.to_string()))
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
