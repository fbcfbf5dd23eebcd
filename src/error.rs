//! Error types for board parsing and solver construction.
//!
//! An unsolvable board is not an error: it is reported through
//! `Solver::is_solvable()` and the `-1` move count.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when a `Solver` cannot be built from its input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    #[error("no initial board was supplied")]
    MissingBoard,
    #[error("board dimension must be at least 2, found {0}")]
    DimensionTooSmall(usize),
}

/// Errors raised by the text input layer in `utils`.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("input is empty, expected the board dimension first")]
    MissingDimension,
    #[error("'{token}' is not a non-negative integer")]
    InvalidNumber { token: String },
    #[error("board dimension must be at least 2, found {0}")]
    DimensionTooSmall(usize),
    #[error("expected {expected} tiles, found {found}")]
    WrongTileCount { expected: usize, found: usize },
    #[error("row {row} has {found} tiles (expected {expected})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("tile {tile} is out of range, tiles must lie in 0..={max}")]
    TileOutOfRange { tile: u32, max: u32 },
    #[error("tile {0} appears more than once")]
    DuplicateTile(u32),
}
