//! Search and planning.
//!
//! Explores the game tree to find the optimal move for the side to play.

pub mod minimax;

pub use minimax::{best_move, search, SearchConfig, SearchResult};
