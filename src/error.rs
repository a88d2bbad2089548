//! Error types for game-rule contract violations.
//!
//! These are programming errors surfaced to the caller, not transient
//! failures: nothing in the engine retries or recovers from them.

use crate::board::Move;

/// Why a move was rejected by the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("cell is already occupied")]
    Occupied,

    #[error("coordinates are outside the 3x3 grid")]
    OutOfRange,
}

/// Errors raised by the engine's operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The target of a move is occupied or off the board.
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: MoveRejection },

    /// The board is not in a state the operation is defined for.
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
}

impl GameError {
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        GameError::InvalidState { reason: reason.into() }
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;
