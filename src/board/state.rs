//! Game state representation.
//!
//! A board is a 3x3 grid of cells held by value. It is trivially copyable,
//! so every transition yields an independent snapshot and no two boards
//! ever share storage.

use serde::{Deserialize, Serialize};

use super::moves::{Move, ALL_MOVES, BOARD_SIZE};
use super::player::{Cell, Player};
use crate::error::{GameError, Result};

/// A snapshot of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells indexed `[row][col]`.
    pub cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the all-empty starting board.
    pub const fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Builds a board directly from its rows.
    pub const fn from_rows(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board { cells }
    }

    /// Returns the cell at `mv`, or None if the coordinates are off the board.
    pub fn cell(&self, mv: Move) -> Option<Cell> {
        if mv.in_bounds() {
            Some(self.cells[mv.row][mv.col])
        } else {
            None
        }
    }

    /// Returns a copy of this board with `mv` set to `cell`.
    ///
    /// Does no legality checking; `mv` must be in bounds.
    pub(crate) fn with_cell(mut self, mv: Move, cell: Cell) -> Self {
        self.cells[mv.row][mv.col] = cell;
        self
    }

    /// Iterates over every cell in row-major order, paired with its move.
    pub fn iter(&self) -> impl Iterator<Item = (Move, Cell)> + '_ {
        ALL_MOVES
            .into_iter()
            .map(move |mv| (mv, self.cells[mv.row][mv.col]))
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.iter().filter(|(_, c)| c.is_empty()).count()
    }

    /// Number of marks placed by `player`.
    pub fn mark_count(&self, player: Player) -> usize {
        self.iter().filter(|(_, c)| c.mark() == Some(player)).count()
    }

    /// Returns the player whose turn it is.
    ///
    /// An odd number of empty cells means an even number of marks have been
    /// placed, so X is to move; an even number means O is.
    pub fn current_player(&self) -> Player {
        if self.empty_count() % 2 == 0 {
            Player::O
        } else {
            Player::X
        }
    }

    /// Returns true if X has placed the same number of marks as O, or one more.
    pub fn is_well_formed(&self) -> bool {
        let x = self.mark_count(Player::X);
        let o = self.mark_count(Player::O);
        x == o || x == o + 1
    }

    /// Fails with `InvalidState` unless the board is well-formed.
    pub fn validate(&self) -> Result<()> {
        if self.is_well_formed() {
            Ok(())
        } else {
            Err(GameError::invalid_state(format!(
                "mark counts X={} O={} cannot arise from alternating play",
                self.mark_count(Player::X),
                self.mark_count(Player::O),
            )))
        }
    }
}

/// Returns the starting position.
pub const fn initial_state() -> Board {
    Board::empty()
}

/// Returns the player to move on `board`.
pub fn current_player(board: &Board) -> Player {
    board.current_player()
}
