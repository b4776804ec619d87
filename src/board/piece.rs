//! Player colours and cell contents.
//!
//! The colour enum carries the explicit symbol and opponent tables so the
//! rest of the engine never branches on raw characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two players. White moves first in both phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

/// Both colours in turn order.
pub const ALL_COLORS: [Color; 2] = [Color::White, Color::Black];

impl Color {
    /// The other player.
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Board symbol used in layouts and diagrams.
    pub const fn symbol(self) -> char {
        match self {
            Color::White => 'O',
            Color::Black => '@',
        }
    }

    pub fn from_symbol(c: char) -> Option<Color> {
        match c {
            'O' => Some(Color::White),
            '@' => Some(Color::Black),
            _ => None,
        }
    }

    /// Index for per-colour arrays.
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// Inclusive row range in which this colour may place pieces.
    pub const fn placing_rows(self) -> (i8, i8) {
        match self {
            Color::White => (0, 5),
            Color::Black => (2, 7),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" | "o" => Ok(Color::White),
            "black" | "b" | "@" => Ok(Color::Black),
            other => Err(format!("unknown colour '{}'", other)),
        }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    /// Permanent flank that sides with whichever piece is next to it.
    Corner,
    Piece(Color),
}

impl Cell {
    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Corner => 'X',
            Cell::Piece(c) => c.symbol(),
        }
    }

    /// Parses a cell symbol. The inactive marker `#` is handled by the layout parser.
    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '-' => Some(Cell::Empty),
            'X' => Some(Cell::Corner),
            _ => Color::from_symbol(c).map(Cell::Piece),
        }
    }

    /// Returns the colour of the piece on this cell, if any.
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Piece(c) => Some(c),
            _ => None,
        }
    }
}
