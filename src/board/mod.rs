//! Board representation and game-state types.
//!
//! Contains the grid, its cells, the two players, and move coordinates.

pub mod moves;
pub mod player;
pub mod state;

pub use moves::{Move, ALL_MOVES, BOARD_SIZE, CELL_COUNT};
pub use player::{Cell, Player, ALL_PLAYERS};
pub use state::{current_player, initial_state, Board};
