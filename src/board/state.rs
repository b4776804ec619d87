//! Board state representation.
//!
//! Holds the 8x8 grid, the active region, and applies actions: placement,
//! movement, custodial capture resolution and the scheduled board shrinks.
//!
//! The grid is a fixed-size array indexed by `Coord::index`, so a board is
//! cheap to clone for simulation. The active region is always a centred
//! square; `shrinks` records how many outer rings have been removed.

use std::fmt;

use log::{debug, info};

use super::action::Action;
use super::coord::{Coord, BOARD_SIZE, CELL_COUNT, DIRECTIONS};
use super::piece::{Cell, Color};

/// The board shrinks exactly twice per game.
pub const MAX_SHRINKS: u8 = 2;

/// A finished game: one side is down to fewer than two pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(Color),
    Draw,
}

/// Complete board state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    cells: [Cell; CELL_COUNT],
    shrinks: u8,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Creates an empty full-size board with its four corners.
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for corner in corners_for(0) {
            cells[corner.index()] = Cell::Corner;
        }
        BoardState { cells, shrinks: 0 }
    }

    /// Number of rings removed so far (0, 1 or 2).
    pub const fn shrinks(&self) -> u8 {
        self.shrinks
    }

    /// Inclusive `(lo, hi)` bounds of the active square on both axes.
    pub const fn active_bounds(&self) -> (i8, i8) {
        let s = self.shrinks as i8;
        (s, BOARD_SIZE - 1 - s)
    }

    /// Returns whether the cell is on the board and still in play.
    pub fn is_active(&self, at: Coord) -> bool {
        let (lo, hi) = self.active_bounds();
        at.in_bounds() && at.col >= lo && at.col <= hi && at.row >= lo && at.row <= hi
    }

    /// Reads an active cell. `None` for out-of-range or inactive coordinates.
    pub fn cell(&self, at: Coord) -> Option<Cell> {
        if self.is_active(at) {
            Some(self.cells[at.index()])
        } else {
            None
        }
    }

    /// Reads the occupant of `(col, row)`; see [`BoardState::cell`].
    pub fn output_piece(&self, col: i8, row: i8) -> Option<Cell> {
        self.cell(Coord::new(col, row))
    }

    /// Returns whether the cell is active and empty.
    pub fn is_vacant(&self, at: Coord) -> bool {
        self.cell(at) == Some(Cell::Empty)
    }

    /// Writes a cell directly, without resolving captures. Used to set up positions.
    ///
    /// # Panics
    /// If `at` is not an active cell.
    pub fn put(&mut self, at: Coord, cell: Cell) {
        assert!(self.is_active(at), "cannot set inactive cell {}", at);
        self.cells[at.index()] = cell;
    }

    /// Coordinates of every `color` piece, in row-major order.
    pub fn search_board(&self, color: Color) -> Vec<Coord> {
        (0..CELL_COUNT)
            .filter(|&i| self.cells[i] == Cell::Piece(color))
            .map(Coord::from_index)
            .collect()
    }

    /// Number of live `color` pieces.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Piece(color)).count()
    }

    /// Moving-phase game result: a side with fewer than two pieces has lost.
    pub fn outcome(&self) -> Option<Outcome> {
        let white_out = self.count(Color::White) < 2;
        let black_out = self.count(Color::Black) < 2;
        match (white_out, black_out) {
            (true, true) => Some(Outcome::Draw),
            (true, false) => Some(Outcome::Winner(Color::Black)),
            (false, true) => Some(Outcome::Winner(Color::White)),
            (false, false) => None,
        }
    }

    /// Applies `action` for `color` and resolves captures around its destination.
    ///
    /// Returns the coordinates of the eliminated opponent pieces. Only the
    /// opponent can lose pieces; the acting piece survives even when it lands
    /// between two enemies.
    ///
    /// # Panics
    /// If the action's preconditions do not hold on this board. Actions built
    /// through [`Action::place`] / [`Action::movement`] or the move generator
    /// for this exact board always satisfy them.
    pub fn modify(&mut self, action: &Action, color: Color) -> Vec<Coord> {
        let dest = action.destination();
        match *action {
            Action::Place(at) => {
                assert!(self.is_vacant(at), "{} placed on non-empty cell {}", color, at);
            }
            Action::Move(mv) => {
                assert_eq!(
                    self.cell(mv.from()),
                    Some(Cell::Piece(color)),
                    "{} moved from {} which it does not hold",
                    color,
                    mv.from()
                );
                assert!(self.is_vacant(mv.to()), "{} moved onto non-empty cell {}", color, mv.to());
                self.cells[mv.from().index()] = Cell::Empty;
            }
        }
        self.cells[dest.index()] = Cell::Piece(color);

        let captured = self.resolve_captures(dest, color);
        if !captured.is_empty() {
            debug!("{} at {} captured {:?}", color, dest, captured);
        }
        captured
    }

    /// Custodial capture from `at` in all four directions.
    fn resolve_captures(&mut self, at: Coord, color: Color) -> Vec<Coord> {
        let enemy = color.opponent();
        let mut captured = Vec::new();
        for dir in DIRECTIONS {
            let adj = at.offset(dir, 1);
            if self.cell(adj) != Some(Cell::Piece(enemy)) {
                continue;
            }
            match self.cell(at.offset(dir, 2)) {
                Some(Cell::Piece(c)) if c == color => {}
                Some(Cell::Corner) => {}
                _ => continue,
            }
            self.cells[adj.index()] = Cell::Empty;
            captured.push(adj);
        }
        captured
    }

    /// Removes the outermost active ring.
    ///
    /// Pieces on the removed ring are eliminated. The corners of the new
    /// active square become corner cells, eliminating any piece on them, and
    /// each new corner then captures adjacent pieces flanked on the far side
    /// by an enemy piece. Returns every eliminated coordinate.
    ///
    /// # Panics
    /// If the board has already shrunk [`MAX_SHRINKS`] times.
    pub fn shrink_board(&mut self) -> Vec<Coord> {
        assert!(
            self.shrinks < MAX_SHRINKS,
            "board already shrunk {} times",
            MAX_SHRINKS
        );

        let (lo, hi) = self.active_bounds();
        let mut eliminated = Vec::new();
        for idx in 0..CELL_COUNT {
            let at = Coord::from_index(idx);
            let on_ring = at.col == lo || at.col == hi || at.row == lo || at.row == hi;
            if !self.is_active(at) || !on_ring {
                continue;
            }
            if let Cell::Piece(_) = self.cells[idx] {
                eliminated.push(at);
            }
            self.cells[idx] = Cell::Empty;
        }
        self.shrinks += 1;

        let corners = corners_for(self.shrinks);
        for corner in corners {
            if let Cell::Piece(_) = self.cells[corner.index()] {
                eliminated.push(corner);
            }
            self.cells[corner.index()] = Cell::Corner;
        }

        for corner in corners {
            for dir in DIRECTIONS {
                let adj = corner.offset(dir, 1);
                let Some(victim) = self.cell(adj).and_then(Cell::color) else {
                    continue;
                };
                if self.cell(corner.offset(dir, 2)) != Some(Cell::Piece(victim.opponent())) {
                    continue;
                }
                self.cells[adj.index()] = Cell::Empty;
                eliminated.push(adj);
            }
        }

        info!(
            "board shrunk to ring {} ({} pieces eliminated)",
            self.shrinks,
            eliminated.len()
        );
        eliminated
    }

    /// Builds a board from raw parts. The layout parser validates them first.
    pub(crate) fn from_parts(cells: [Cell; CELL_COUNT], shrinks: u8) -> Self {
        BoardState { cells, shrinks }
    }
}

/// Corners of the active square after `shrinks` rings were removed:
/// top-left, top-right, bottom-left, bottom-right.
pub fn corners_for(shrinks: u8) -> [Coord; 4] {
    let lo = shrinks as i8;
    let hi = BOARD_SIZE - 1 - lo;
    [
        Coord::new(lo, lo),
        Coord::new(hi, lo),
        Coord::new(lo, hi),
        Coord::new(hi, hi),
    ]
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let sym = match self.cell(Coord::new(col, row)) {
                    Some(cell) => cell.symbol(),
                    None => ' ',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", sym)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
