//! Legal move generation.
//!
//! A move is legal when its target cell is empty. Moves are produced in
//! row-major order; the search relies on this order to break ties between
//! equally good moves.

use rand::Rng;

use crate::board::{Board, Move};

/// Returns every empty cell as a move, in row-major order.
///
/// Returns an empty list for a full board. Does not look at whether the game
/// has already been won; callers that care check `is_terminal` first.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    board
        .iter()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(mv, _)| mv)
        .collect()
}

/// Picks a uniformly random legal move, or None if the board is full.
pub fn random_move(board: &Board, rng: &mut impl Rng) -> Option<Move> {
    let legal = legal_moves(board);
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}
