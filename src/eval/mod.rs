//! Position evaluation.
//!
//! Scores a board from a given colour's perspective. The search is generic
//! over [`Evaluator`], so any scoring function can be plugged in; the
//! default is the weighted [`Heuristic`].

pub mod heuristic;

pub use heuristic::{evaluate, EvalWeights, Heuristic};

use crate::board::{BoardState, Color};

/// Evaluation score. Positive favours the perspective colour.
pub type Score = i32;

/// Every heuristic score lies within `-EVAL_BOUND..=EVAL_BOUND`.
pub const EVAL_BOUND: Score = 10_000;

/// Utility of a won (or lost, negated) position. Strictly outside the heuristic range.
pub const WIN_SCORE: Score = 1_000_000;

/// Scores a board from `perspective`'s point of view.
///
/// Implementations must be deterministic and return values within
/// `±EVAL_BOUND` so that search bounds stay meaningful.
pub trait Evaluator {
    fn evaluate(&self, board: &BoardState, perspective: Color) -> Score;
}

impl<F> Evaluator for F
where
    F: Fn(&BoardState, Color) -> Score,
{
    fn evaluate(&self, board: &BoardState, perspective: Color) -> Score {
        self(board, perspective).clamp(-EVAL_BOUND, EVAL_BOUND)
    }
}
