use alloc::string::String;
use core::fmt;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfBounds,
    Occupied,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("coordinates are outside the board"),
            Self::Occupied => f.write_str("cell is already marked"),
        }
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration, board size must be at least 1")]
    InvalidConfiguration,
    #[error("Illegal move: {0}")]
    IllegalMove(MoveRejection),
    #[error("Game already over, reset before placing new marks")]
    GameAlreadyOver,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Cell labels must be distinct, non-empty and free of whitespace")]
    InvalidLabels,
    #[error("Unknown cell label in move log")]
    UnknownLabel,
    #[error("Move log is not a sequence of single alternating placements")]
    InconsistentHistory,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure to mirror a snapshot to a move sink; the board is unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to append move log: {0}")]
pub struct LogError(pub String);
