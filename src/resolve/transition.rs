//! State transition.
//!
//! Applying a move marks one empty cell for the player to move and returns
//! the resulting board. The input board is never modified.

use crate::board::{Board, Cell, Move};
use crate::error::{GameError, MoveRejection, Result};

/// Returns the board that results from the current player marking `mv`.
///
/// Fails with `InvalidMove` if the cell is occupied or the coordinates lie
/// outside the grid.
pub fn apply_move(board: &Board, mv: Move) -> Result<Board> {
    let cell = board.cell(mv).ok_or(GameError::InvalidMove {
        mv,
        reason: MoveRejection::OutOfRange,
    })?;
    if !cell.is_empty() {
        return Err(GameError::InvalidMove {
            mv,
            reason: MoveRejection::Occupied,
        });
    }
    Ok(board.with_cell(mv, Cell::from(board.current_player())))
}
