//! Error types for the merge engine.

use crate::game::Coord;
use std::fmt;

/// Errors raised when the engine is handed input it cannot accept.
///
/// None of these occur during normal play: a move that changes nothing is a
/// silent no-op, and reaching the lost state is a game outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Numeric direction code outside `0..=3`.
    InvalidDirection(u8),
    /// Text that names no direction.
    ParseDirection(String),
    /// Board size outside the supported range.
    InvalidGridSize {
        /// The rejected size.
        size: usize,
    },
    /// Tile value that is not a power of two >= 2.
    InvalidTileValue {
        /// The rejected value.
        value: u32,
    },
    /// Win value that is not a power of two >= 4.
    InvalidWinValue {
        /// The rejected value.
        value: u32,
    },
    /// Probability of spawning a 4 outside `[0, 1]`.
    InvalidSpawnProbability(f64),
    /// A literal grid row with the wrong number of cells.
    RowLength {
        /// Cells expected per row.
        expected: usize,
        /// Cells found in the offending row.
        found: usize,
    },
    /// Cell access outside the board.
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Side length of the board.
        size: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidDirection(code) => {
                write!(f, "invalid direction code {code} (expected 0-3)")
            }
            EngineError::ParseDirection(text) => write!(f, "unknown direction: {text:?}"),
            EngineError::InvalidGridSize { size } => write!(
                f,
                "grid size {size} outside {}..={}",
                crate::game::MIN_GRID_SIZE,
                crate::game::MAX_GRID_SIZE
            ),
            EngineError::InvalidTileValue { value } => {
                write!(f, "tile value {value} is not a power of two >= 2")
            }
            EngineError::InvalidWinValue { value } => {
                write!(f, "win value {value} is not a power of two >= 4")
            }
            EngineError::InvalidSpawnProbability(p) => {
                write!(f, "spawn probability {p} outside [0, 1]")
            }
            EngineError::RowLength { expected, found } => {
                write!(f, "grid row has {found} cells, expected {expected}")
            }
            EngineError::OutOfBounds { coord, size } => {
                write!(f, "cell {coord} out of bounds for {size}x{size} grid")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for fallible engine calls.
pub type Result<T> = std::result::Result<T, EngineError>;
