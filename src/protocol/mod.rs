//! Referee protocol handling.
//!
//! Action notation for placements, moves and forfeits, a board layout
//! notation for setting up positions, and the line-oriented command parser
//! driven by the main loop.

pub mod layout;
pub mod notation;
pub mod parser;

pub use layout::{encode_layout, parse_layout, LayoutError};
pub use notation::{parse_action, ActionNotation, NotationError};
pub use parser::{parse_command, Command, CommandError};
