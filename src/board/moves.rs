//! Move coordinates.
//!
//! A move names the cell a player marks. Coordinates are not range-checked
//! on construction so that the transition can reject off-board moves with
//! the same error it uses for occupied cells.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the grid.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the grid.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A zero-based (row, column) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

/// Every on-board move in row-major order.
pub const ALL_MOVES: [Move; CELL_COUNT] = [
    Move::new(0, 0),
    Move::new(0, 1),
    Move::new(0, 2),
    Move::new(1, 0),
    Move::new(1, 1),
    Move::new(1, 2),
    Move::new(2, 0),
    Move::new(2, 1),
    Move::new(2, 2),
];

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    /// Returns true if both coordinates lie within the grid.
    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major index of the cell, or None if off the board.
    pub const fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.row * BOARD_SIZE + self.col)
        } else {
            None
        }
    }

    /// Builds a move from a row-major index.
    pub const fn from_index(idx: usize) -> Option<Move> {
        if idx < CELL_COUNT {
            Some(Move::new(idx / BOARD_SIZE, idx % BOARD_SIZE))
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
