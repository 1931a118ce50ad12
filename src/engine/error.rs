//! Error types for the engine and its configuration loader.

use std::path::PathBuf;

use thiserror::Error;

/// Why a human move was rejected. All variants are recoverable: the
/// presentation layer should ignore the click.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("the round is already decided")]
    BoardLocked,

    #[error("cell ({row}, {col}) is out of bounds (must be 0-2)")]
    OutOfBounds { row: usize, col: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A mode or difficulty name that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} '{input}'. Expected one of: {expected}")]
pub struct ParseError {
    pub kind: &'static str,
    pub input: String,
    pub expected: &'static str,
}
