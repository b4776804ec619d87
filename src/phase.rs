//! Game phase sequencing.
//!
//! The clock is a plain value: `advance` returns the next clock together
//! with the shrink (if any) that the completed turn triggers, and callers
//! apply that shrink to their own board.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Color, Coord, ALL_COLORS};

/// Pieces each side places before the moving phase starts.
pub const PIECE_QUOTA: u8 = 12;

/// Moving-phase turn indices after which the board shrinks.
pub const SHRINK_TURNS: [u32; 2] = [127, 191];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Placing,
    Moving,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Placing => write!(f, "placing"),
            Phase::Moving => write!(f, "moving"),
        }
    }
}

/// A scheduled board shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shrink {
    Early,
    Late,
}

impl Shrink {
    /// Shrinks the board must already have undergone for this one to apply.
    pub const fn prior(self) -> u8 {
        match self {
            Shrink::Early => 0,
            Shrink::Late => 1,
        }
    }

    /// Shrinks `board` if it is exactly one ring short of this shrink.
    ///
    /// Returns the eliminated cells, or `None` when the board is not at
    /// the expected stage (the shrink was already applied, or a position
    /// was loaded with more rings gone).
    pub fn apply(self, board: &mut BoardState) -> Option<Vec<Coord>> {
        if board.shrinks() != self.prior() {
            debug!("{:?} shrink skipped, board has shrunk {} times", self, board.shrinks());
            return None;
        }
        Some(board.shrink_board())
    }
}

/// Phase and turn bookkeeping for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameClock {
    pub phase: Phase,
    /// Turns completed in the current phase.
    pub turns: u32,
    /// Pieces placed so far, indexed by `Color::index`.
    pub placed: [u8; 2],
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub const fn new() -> Self {
        GameClock {
            phase: Phase::Placing,
            turns: 0,
            placed: [0, 0],
        }
    }

    /// A clock already in the moving phase at `turns`.
    pub const fn moving(turns: u32) -> Self {
        GameClock {
            phase: Phase::Moving,
            turns,
            placed: [PIECE_QUOTA, PIECE_QUOTA],
        }
    }

    pub fn placed(&self, color: Color) -> u8 {
        self.placed[color.index()]
    }

    /// The clock after `mover` completes a turn, and the shrink that turn triggers.
    pub fn advance(self, mover: Color) -> (GameClock, Option<Shrink>) {
        let mut next = self;
        match self.phase {
            Phase::Placing => {
                next.placed[mover.index()] = next.placed[mover.index()].saturating_add(1);
                next.turns += 1;
                if ALL_COLORS.iter().all(|&c| next.placed(c) >= PIECE_QUOTA) {
                    info!("placing complete, moving phase begins");
                    next.phase = Phase::Moving;
                    next.turns = 0;
                }
                (next, None)
            }
            Phase::Moving => {
                let shrink = if self.turns == SHRINK_TURNS[0] {
                    Some(Shrink::Early)
                } else if self.turns == SHRINK_TURNS[1] {
                    Some(Shrink::Late)
                } else {
                    None
                };
                next.turns += 1;
                (next, shrink)
            }
        }
    }

    /// Adopts an externally supplied turn count.
    pub fn synced(self, turns: u32) -> Self {
        GameClock { turns, ..self }
    }
}
