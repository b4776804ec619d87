//! Board representation and game-state types.
//!
//! Contains coordinates, colours and cells, the board state with its
//! capture and shrink rules, and the validated move/action types.

pub mod action;
pub mod coord;
pub mod piece;
pub mod state;

pub use action::{Action, InvalidMove, Move};
pub use coord::{Coord, Direction, BOARD_SIZE, CELL_COUNT, DIRECTIONS};
pub use piece::{Cell, Color, ALL_COLORS};
pub use state::{corners_for, BoardState, Outcome, MAX_SHRINKS};
