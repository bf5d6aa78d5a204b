//! Errors returned by engine operations.

use thiserror::Error;

use crate::controller::RoundHandle;

pub type Result<T> = std::result::Result<T, BingoError>;

/// Recoverable engine errors. None of them change round state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BingoError {
    #[error("You can only mark numbers that have been called! ({value} at {col},{row})")]
    NotCalled { col: u8, row: u8, value: u8 },

    #[error("No valid Bingo pattern found!")]
    NoPattern,

    #[error("Seed {seed} outside accepted range {min}..={max}")]
    InvalidSeed { seed: i64, min: i64, max: i64 },

    #[error("Cell ({col},{row}) is off the card")]
    OutOfBounds { col: u8, row: u8 },

    #[error("No active round")]
    RoundNotActive,

    #[error("Round {0} has been superseded")]
    StaleRound(RoundHandle),

    #[error("No previous round to play again")]
    NoPreviousRound,

    #[error("Ball {0} has already been called")]
    AlreadyCalled(u8),

    #[error("Ball {0} outside 1..=75")]
    BallOutOfRange(u8),
}
