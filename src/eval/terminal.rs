//! Terminal-state classification.
//!
//! Detects three-in-a-row wins and full-board draws, and scores finished
//! games from X's perspective.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Player};
use crate::error::{GameError, Result};

/// Score of a game X has won.
pub const X_WIN_UTILITY: i32 = 1;

/// Score of a game O has won.
pub const O_WIN_UTILITY: i32 = -1;

/// Score of a drawn game.
pub const DRAW_UTILITY: i32 = 0;

/// The eight winning lines in scan order: rows top to bottom, columns left
/// to right, then the main diagonal and the anti-diagonal.
pub const WIN_LINES: [[Move; 3]; 8] = [
    [Move::new(0, 0), Move::new(0, 1), Move::new(0, 2)],
    [Move::new(1, 0), Move::new(1, 1), Move::new(1, 2)],
    [Move::new(2, 0), Move::new(2, 1), Move::new(2, 2)],
    [Move::new(0, 0), Move::new(1, 0), Move::new(2, 0)],
    [Move::new(0, 1), Move::new(1, 1), Move::new(2, 1)],
    [Move::new(0, 2), Move::new(1, 2), Move::new(2, 2)],
    [Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)],
    [Move::new(0, 2), Move::new(1, 1), Move::new(2, 0)],
];

/// The state of a game on a given board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    XWins,
    OWins,
    Draw,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winning player, if the game was won.
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::XWins => Some(Player::X),
            Outcome::OWins => Some(Player::O),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }
}

/// Returns the mark on the first fully matching line, scanning lines in
/// `WIN_LINES` order.
pub fn winner(board: &Board) -> Option<Player> {
    let at = |mv: Move| board.cells[mv.row][mv.col];
    WIN_LINES.iter().find_map(|&[first, second, third]| {
        let (a, b, c) = (at(first), at(second), at(third));
        match a.mark() {
            Some(p) if a == b && b == c => Some(p),
            _ => None,
        }
    })
}

/// Classifies the board.
pub fn outcome(board: &Board) -> Outcome {
    match winner(board) {
        Some(Player::X) => Outcome::XWins,
        Some(Player::O) => Outcome::OWins,
        None if board.empty_count() == 0 => Outcome::Draw,
        None => Outcome::Ongoing,
    }
}

/// Returns true if the game has been won or the board is full.
pub fn is_terminal(board: &Board) -> bool {
    outcome(board).is_terminal()
}

/// Scores a finished game: +1 for an X win, -1 for an O win, 0 for a draw.
///
/// Fails with `InvalidState` if the game is still in progress.
pub fn utility(board: &Board) -> Result<i32> {
    match outcome(board) {
        Outcome::XWins => Ok(X_WIN_UTILITY),
        Outcome::OWins => Ok(O_WIN_UTILITY),
        Outcome::Draw => Ok(DRAW_UTILITY),
        Outcome::Ongoing => Err(GameError::invalid_state(
            "utility is only defined for terminal boards",
        )),
    }
}
