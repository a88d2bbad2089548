//! Position evaluation.
//!
//! Classifies a board as won, drawn, or ongoing and assigns terminal
//! boards their utility from X's perspective.

pub mod terminal;

pub use terminal::{
    is_terminal, outcome, utility, winner, Outcome, DRAW_UTILITY, O_WIN_UTILITY, WIN_LINES,
    X_WIN_UTILITY,
};
