//! Error types

use crate::Position;
use thiserror::Error;

/// Why a placement was refused. All three are ordinary outcomes of play.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("square {0} is outside the board")]
    OutsideBounds(Position),

    #[error("square {0} already holds a figure")]
    Occupied(Position),

    #[error("a figure on {0} would attack or be attacked by another figure")]
    Invalid(Position),
}

impl PlacementError {
    /// The square the rejected figure was meant for
    pub fn position(&self) -> Position {
        match *self {
            Self::OutsideBounds(pos) | Self::Occupied(pos) | Self::Invalid(pos) => pos,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("board size must be at least 1, got {0}")]
    InvalidBoardSize(i64),
}

/// Failures of a best-time store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid best-times data: {0}")]
    Format(String),
}
