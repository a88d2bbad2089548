//! Position notation.
//!
//! Text encoding used to record positions in self-play output and to pass
//! positions on the command line.

pub mod notation;

pub use notation::{encode_board, parse_board, NotationError};
