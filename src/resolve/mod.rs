//! Move resolution.
//!
//! Turns a board and a move into the next board.

pub mod transition;

pub use transition::apply_move;
