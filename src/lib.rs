//! Tic-tac-toe engine library.
//!
//! Exposes the board representation, move generation, move resolution,
//! terminal classification, and minimax search, plus position notation and
//! self-play for use by integration tests and the `selfplay` binary.

pub mod board;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod search;
pub mod selfplay;

pub use board::{current_player, initial_state, Board, Cell, Move, Player};
pub use error::{GameError, MoveRejection, Result};
pub use eval::{is_terminal, outcome, utility, winner, Outcome};
pub use movegen::legal_moves;
pub use resolve::apply_move;
pub use search::{best_move, search, SearchConfig, SearchResult};
