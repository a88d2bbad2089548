//! Exhaustive minimax search.
//!
//! X maximizes utility and O minimizes it. The tree is searched to terminal
//! positions with no pruning, memoization, or depth limit: the game is at
//! most nine plies deep, so the recursion depth is trivially bounded.
//!
//! Ties go to the first optimal move in row-major order. A later move only
//! replaces the current best when its score is strictly better, and the
//! parallel root combines results in the same order, so both modes return
//! the same move.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Move, Player};
use crate::error::Result;
use crate::eval::{is_terminal, utility};
use crate::movegen::legal_moves;
use crate::resolve::apply_move;

/// Search options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Evaluate the root moves concurrently on rayon's thread pool.
    pub parallel: bool,
}

/// Result of a search: the chosen move and associated info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// None when the board is already terminal.
    pub best_move: Option<Move>,
    /// Minimax value of the position from X's perspective.
    pub score: i32,
    /// Positions visited, including the root.
    pub nodes: u64,
}

/// Returns the optimal move for the player to move, or None if the game is over.
///
/// Fails with `InvalidState` if the board could not arise from alternating play.
pub fn best_move(board: &Board) -> Result<Option<Move>> {
    search(board, &SearchConfig::default()).map(|r| r.best_move)
}

/// Searches the full game tree below `board`.
pub fn search(board: &Board, config: &SearchConfig) -> Result<SearchResult> {
    board.validate()?;

    let maximizing = board.current_player() == Player::X;
    let result = if config.parallel && !is_terminal(board) {
        search_root_parallel(board, maximizing)?
    } else {
        let mut nodes = 0;
        let (score, best_move) = if maximizing {
            max_value(board, &mut nodes)?
        } else {
            min_value(board, &mut nodes)?
        };
        SearchResult { best_move, score, nodes }
    };

    debug!(
        best_move = ?result.best_move,
        score = result.score,
        nodes = result.nodes,
        parallel = config.parallel,
        "search complete"
    );
    Ok(result)
}

/// Best achievable (score, move) for X, assuming O replies optimally.
fn max_value(board: &Board, nodes: &mut u64) -> Result<(i32, Option<Move>)> {
    *nodes += 1;
    if is_terminal(board) {
        return Ok((utility(board)?, None));
    }

    let mut best_score = i32::MIN;
    let mut best_move = None;
    for mv in legal_moves(board) {
        let (score, _) = min_value(&apply_move(board, mv)?, nodes)?;
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }
    Ok((best_score, best_move))
}

/// Best achievable (score, move) for O, assuming X replies optimally.
fn min_value(board: &Board, nodes: &mut u64) -> Result<(i32, Option<Move>)> {
    *nodes += 1;
    if is_terminal(board) {
        return Ok((utility(board)?, None));
    }

    let mut best_score = i32::MAX;
    let mut best_move = None;
    for mv in legal_moves(board) {
        let (score, _) = max_value(&apply_move(board, mv)?, nodes)?;
        if score < best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }
    Ok((best_score, best_move))
}

/// Scores each root move on its own rayon task, then picks the winner
/// sequentially in enumeration order.
fn search_root_parallel(board: &Board, maximizing: bool) -> Result<SearchResult> {
    let scored: Vec<(Move, i32, u64)> = legal_moves(board)
        .into_par_iter()
        .map(|mv| -> Result<(Move, i32, u64)> {
            let child = apply_move(board, mv)?;
            let mut nodes = 0;
            let (score, _) = if maximizing {
                min_value(&child, &mut nodes)?
            } else {
                max_value(&child, &mut nodes)?
            };
            Ok((mv, score, nodes))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;
    let mut nodes = 1;
    for (mv, score, subtree_nodes) in scored {
        nodes += subtree_nodes;
        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better {
            best_score = score;
            best_move = Some(mv);
        }
    }

    Ok(SearchResult {
        best_move,
        score: best_score,
        nodes,
    })
}
