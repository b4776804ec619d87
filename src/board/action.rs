//! Validated transitions: piece placements and piece moves.
//!
//! A [`Move`] can only be obtained through validation against a board (or
//! from the move generator, which only emits legal moves), so holding one
//! means it was legal on the board it was built for.

use thiserror::Error;

use super::coord::Coord;
use super::piece::{Cell, Color};
use super::state::BoardState;

/// Reasons a proposed placement or move is illegal on the current board.
///
/// These are expected rejections: move generation, capture checks and
/// simulations treat them as "this candidate is illegal".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("{0} is off the board")]
    OutOfRange(Coord),

    #[error("{0} is no longer in play")]
    Inactive(Coord),

    #[error("{0} is occupied")]
    Occupied(Coord),

    #[error("no {color} piece at {at}")]
    NotOwned { color: Color, at: Coord },

    #[error("{to} cannot be reached from {from}")]
    Unreachable { from: Coord, to: Coord },

    #[error("{at} is outside the {color} placing zone")]
    OutsideZone { color: Color, at: Coord },
}

/// A piece movement: a one-cell step or a two-cell jump over a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Coord,
    to: Coord,
}

impl Move {
    /// Validates `from -> to` for `color` on `board`.
    pub fn new(board: &BoardState, color: Color, from: Coord, to: Coord) -> Result<Move, InvalidMove> {
        check_target(board, to)?;
        if !from.in_bounds() {
            return Err(InvalidMove::OutOfRange(from));
        }
        if !board.is_active(from) {
            return Err(InvalidMove::Inactive(from));
        }
        if board.cell(from) != Some(Cell::Piece(color)) {
            return Err(InvalidMove::NotOwned { color, at: from });
        }

        let dc = to.col - from.col;
        let dr = to.row - from.row;
        let reachable = match (dc.abs(), dr.abs()) {
            (1, 0) | (0, 1) => true,
            (2, 0) | (0, 2) => {
                let over = Coord::new(from.col + dc / 2, from.row + dr / 2);
                matches!(board.cell(over), Some(Cell::Piece(_)))
            }
            _ => false,
        };
        if !reachable {
            return Err(InvalidMove::Unreachable { from, to });
        }

        Ok(Move { from, to })
    }

    /// Builds a move the caller has already proven legal.
    pub(crate) const fn unchecked(from: Coord, to: Coord) -> Move {
        Move { from, to }
    }

    pub const fn from(&self) -> Coord {
        self.from
    }

    pub const fn to(&self) -> Coord {
        self.to
    }

    /// Whether this move jumps over an adjacent piece.
    pub fn is_jump(&self) -> bool {
        self.from.manhattan(self.to) == 2
    }
}

/// A transition applied to the board by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Placing phase: put a new piece on the board.
    Place(Coord),
    /// Moving phase: move an existing piece.
    Move(Move),
}

impl Action {
    /// Validates a placement of a new `color` piece at `at`.
    pub fn place(board: &BoardState, color: Color, at: Coord) -> Result<Action, InvalidMove> {
        check_target(board, at)?;
        let (lo, hi) = color.placing_rows();
        if at.row < lo || at.row > hi {
            return Err(InvalidMove::OutsideZone { color, at });
        }
        Ok(Action::Place(at))
    }

    /// Validates a move of a `color` piece from `from` to `to`.
    pub fn movement(
        board: &BoardState,
        color: Color,
        from: Coord,
        to: Coord,
    ) -> Result<Action, InvalidMove> {
        Move::new(board, color, from, to).map(Action::Move)
    }

    /// The cell the acting piece ends up on.
    pub const fn destination(&self) -> Coord {
        match self {
            Action::Place(at) => *at,
            Action::Move(mv) => mv.to,
        }
    }
}

impl From<Move> for Action {
    fn from(mv: Move) -> Self {
        Action::Move(mv)
    }
}

/// Destination checks shared by placements and moves.
fn check_target(board: &BoardState, to: Coord) -> Result<(), InvalidMove> {
    if !to.in_bounds() {
        return Err(InvalidMove::OutOfRange(to));
    }
    if !board.is_active(to) {
        return Err(InvalidMove::Inactive(to));
    }
    if board.cell(to) != Some(Cell::Empty) {
        return Err(InvalidMove::Occupied(to));
    }
    Ok(())
}
