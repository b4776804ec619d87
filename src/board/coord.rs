//! Board coordinates and orthogonal directions.
//!
//! Cells are addressed by `(col, row)` with `(0, 0)` at the top-left.
//! Components are signed so that neighbour arithmetic can step off the
//! board and be rejected by a bounds check instead of wrapping.

use std::fmt;

/// Width and height of the board.
pub const BOARD_SIZE: i8 = 8;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A cell address on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub col: i8,
    pub row: i8,
}

impl Coord {
    pub const fn new(col: i8, row: i8) -> Self {
        Coord { col, row }
    }

    /// Returns whether the coordinate lies on the 8x8 grid.
    pub const fn in_bounds(self) -> bool {
        self.col >= 0 && self.col < BOARD_SIZE && self.row >= 0 && self.row < BOARD_SIZE
    }

    /// Row-major index into the cell array. Only meaningful when in bounds.
    pub const fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + self.col as usize
    }

    /// Inverse of [`Coord::index`].
    pub const fn from_index(idx: usize) -> Self {
        Coord {
            col: (idx % BOARD_SIZE as usize) as i8,
            row: (idx / BOARD_SIZE as usize) as i8,
        }
    }

    /// Steps `n` cells in the given direction.
    pub const fn offset(self, dir: Direction, n: i8) -> Self {
        let (dc, dr) = dir.delta();
        Coord {
            col: self.col + dc * n,
            row: self.row + dr * n,
        }
    }

    /// Ring rank of the cell: 0 on the outer edge, 3 for the central 2x2.
    pub fn ring(self) -> u8 {
        let c = self.col.min(BOARD_SIZE - 1 - self.col);
        let r = self.row.min(BOARD_SIZE - 1 - self.row);
        c.min(r).max(0) as u8
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Coord) -> u8 {
        ((self.col - other.col).abs() + (self.row - other.row).abs()) as u8
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// One of the four orthogonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Fixed scan order used by move generation and capture resolution.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

impl Direction {
    /// `(dcol, drow)` for a single step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}
