//! Cheap move policies used instead of (or alongside) full search.
//!
//! All policies take the board by reference and simulate on private copies,
//! so choosing a move never mutates the caller's board.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Action, BoardState, Cell, Color, Coord, Move, BOARD_SIZE};
use crate::movegen::{generate_moves, legal_placements};

/// A moving-phase decision. Forfeit is a value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Move(Move),
    Forfeit,
}

impl Decision {
    pub fn into_move(self) -> Option<Move> {
        match self {
            Decision::Move(mv) => Some(mv),
            Decision::Forfeit => None,
        }
    }
}

impl From<Option<Move>> for Decision {
    fn from(mv: Option<Move>) -> Self {
        mv.map_or(Decision::Forfeit, Decision::Move)
    }
}

/// Which move selection the engine uses in the moving phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    #[serde(rename = "random")]
    Random,
    #[serde(rename = "greedy")]
    GreedyCapture,
    #[serde(rename = "centre")]
    Centralize,
    #[default]
    #[serde(rename = "alphabeta")]
    AlphaBeta,
}

impl Policy {
    pub const fn name(self) -> &'static str {
        match self {
            Policy::Random => "random",
            Policy::GreedyCapture => "greedy",
            Policy::Centralize => "centre",
            Policy::AlphaBeta => "alphabeta",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Policy::Random),
            "greedy" => Ok(Policy::GreedyCapture),
            "centre" | "center" => Ok(Policy::Centralize),
            "alphabeta" => Ok(Policy::AlphaBeta),
            other => Err(format!("unknown strategy: {}", other)),
        }
    }
}

/// Picks a uniformly random legal move, or forfeits when there is none.
pub fn random_move(board: &BoardState, color: Color, rng: &mut impl Rng) -> Decision {
    let legal = generate_moves(board, color);
    if legal.is_empty() {
        return Decision::Forfeit;
    }
    Decision::Move(legal[rng.gen_range(0..legal.len())])
}

/// Picks a uniformly random legal placement cell.
pub fn random_placement(board: &BoardState, color: Color, rng: &mut impl Rng) -> Option<Coord> {
    let cells = legal_placements(board, color);
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.gen_range(0..cells.len())])
}

/// Returns whether playing `mv` removes at least one opponent piece.
pub fn captures_opponent(board: &BoardState, color: Color, mv: &Move) -> bool {
    let before = board.count(color.opponent());
    let mut scratch = board.clone();
    scratch.modify(&Action::Move(*mv), color);
    scratch.count(color.opponent()) < before
}

/// The first capturing move in generator order; otherwise a centralizing
/// move; otherwise a random one.
pub fn greedy_capture_move(board: &BoardState, color: Color, rng: &mut impl Rng) -> Decision {
    let legal = generate_moves(board, color);
    if let Some(mv) = legal.iter().find(|mv| captures_opponent(board, color, mv)) {
        return Decision::Move(*mv);
    }
    if let Some(mv) = centralizing_move(board, color) {
        return Decision::Move(mv);
    }
    random_move(board, color, rng)
}

/// Cells of ring `rank` (0 = outer edge, 3 = centre 2x2), row-major.
pub fn tiles_of_rank(rank: u8) -> Vec<Coord> {
    let mut tiles = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let at = Coord::new(col, row);
            if at.ring() == rank {
                tiles.push(at);
            }
        }
    }
    tiles
}

/// One step toward the centre for a column or row index, if it is off-centre.
fn toward_centre(v: i8) -> Option<i8> {
    if v <= 2 {
        Some(v + 1)
    } else if v >= 5 {
        Some(v - 1)
    } else {
        None
    }
}

/// A one-step move bringing an outer piece closer to the centre.
///
/// Scans rings from the edge inwards, each row-major. For the first own
/// piece that can legally step inward, the column adjustment is tried
/// before the row adjustment.
pub fn centralizing_move(board: &BoardState, color: Color) -> Option<Move> {
    for rank in 0..=3 {
        for at in tiles_of_rank(rank) {
            if board.cell(at) != Some(Cell::Piece(color)) {
                continue;
            }
            let candidates = [
                toward_centre(at.col).map(|col| Coord::new(col, at.row)),
                toward_centre(at.row).map(|row| Coord::new(at.col, row)),
            ];
            for to in candidates.into_iter().flatten() {
                if let Ok(mv) = Move::new(board, color, at, to) {
                    return Some(mv);
                }
            }
        }
    }
    None
}
