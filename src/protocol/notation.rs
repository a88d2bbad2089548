//! Compact position notation.
//!
//! Encodes a board as a single line of three rows separated by `/`, each
//! row three characters from `X`, `O`, and `.` for an empty cell:
//!
//! ```text
//! XX./OO./...
//! ```
//!
//! Parsing checks only the syntax. Whether the position could arise from
//! alternating play is left to `Board::validate`.

use crate::board::{Board, Cell, BOARD_SIZE};

/// Errors that can occur during notation parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected 3 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {len} cells, expected 3")]
    WrongRowLength { row: usize, len: usize },

    #[error("invalid cell character: '{0}'")]
    InvalidCell(char),
}

/// Parses a board from its notation string.
pub fn parse_board(s: &str) -> Result<Board, NotationError> {
    let rows: Vec<&str> = s.trim().split('/').collect();
    if rows.len() != BOARD_SIZE {
        return Err(NotationError::WrongRowCount(rows.len()));
    }

    let mut board = Board::empty();
    for (r, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != BOARD_SIZE {
            return Err(NotationError::WrongRowLength { row: r, len });
        }
        for (c, ch) in row.chars().enumerate() {
            board.cells[r][c] = Cell::from_notation_char(ch).ok_or(NotationError::InvalidCell(ch))?;
        }
    }
    Ok(board)
}

/// Encodes a board as its notation string.
pub fn encode_board(board: &Board) -> String {
    let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
    for (r, row) in board.cells.iter().enumerate() {
        if r > 0 {
            out.push('/');
        }
        out.extend(row.iter().map(|c| c.notation_char()));
    }
    out
}
