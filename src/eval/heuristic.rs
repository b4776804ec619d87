//! Heuristic position evaluation.
//!
//! Evaluates a board from a given colour's perspective using three
//! handcrafted features: material balance, centrality (ring rank of each
//! piece) and mobility (legal move count). Each feature is a difference
//! between the perspective colour and its opponent, so the score is
//! antisymmetric: `evaluate(b, c) == -evaluate(b, c.opponent())`.

use serde::{Deserialize, Serialize};

use super::{Evaluator, Score, EVAL_BOUND};
use crate::board::{BoardState, Color};
use crate::movegen::generate_moves;

/// Feature weights. Loaded from the engine config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub material: i32,
    pub centrality: i32,
    pub mobility: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            material: 100,
            centrality: 4,
            mobility: 1,
        }
    }
}

/// Weighted material + centrality + mobility evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heuristic {
    pub weights: EvalWeights,
}

impl Heuristic {
    pub fn new(weights: EvalWeights) -> Self {
        Heuristic { weights }
    }
}

impl Evaluator for Heuristic {
    fn evaluate(&self, board: &BoardState, perspective: Color) -> Score {
        let w = self.weights;
        let total = w.material as i64 * material(board, perspective) as i64
            + w.centrality as i64 * centrality(board, perspective) as i64
            + w.mobility as i64 * mobility(board, perspective) as i64;
        total.clamp(-(EVAL_BOUND as i64), EVAL_BOUND as i64) as Score
    }
}

/// Scores `board` for `perspective` with the default weights.
pub fn evaluate(board: &BoardState, perspective: Color) -> Score {
    Heuristic::default().evaluate(board, perspective)
}

/// Own live pieces minus opponent live pieces.
pub fn material(board: &BoardState, perspective: Color) -> i32 {
    board.count(perspective) as i32 - board.count(perspective.opponent()) as i32
}

/// Sum of ring ranks (0 = edge, 3 = centre) of own pieces minus the opponent's.
pub fn centrality(board: &BoardState, perspective: Color) -> i32 {
    let rank_sum = |color| -> i32 {
        board
            .search_board(color)
            .iter()
            .map(|c| c.ring() as i32)
            .sum()
    };
    rank_sum(perspective) - rank_sum(perspective.opponent())
}

/// Own legal move count minus the opponent's.
pub fn mobility(board: &BoardState, perspective: Color) -> i32 {
    generate_moves(board, perspective).len() as i32
        - generate_moves(board, perspective.opponent()).len() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Coord};

    fn board_with(pieces: &[(i8, i8, Color)]) -> BoardState {
        let mut board = BoardState::new();
        for &(col, row, color) in pieces {
            board.put(Coord::new(col, row), Cell::Piece(color));
        }
        board
    }

    #[test]
    fn empty_board_is_even() {
        let board = BoardState::new();
        assert_eq!(evaluate(&board, Color::White), 0);
        assert_eq!(evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn material_dominates() {
        let board = board_with(&[(0, 3, Color::White), (1, 3, Color::White), (3, 3, Color::Black)]);
        assert!(evaluate(&board, Color::White) > 0);
        assert!(evaluate(&board, Color::Black) < 0);
    }

    #[test]
    fn score_is_antisymmetric() {
        let board = board_with(&[
            (2, 2, Color::White),
            (5, 1, Color::White),
            (3, 4, Color::Black),
            (6, 6, Color::Black),
            (0, 5, Color::Black),
        ]);
        assert_eq!(
            evaluate(&board, Color::White),
            -evaluate(&board, Color::Black)
        );
    }

    #[test]
    fn centre_beats_edge() {
        let centre = board_with(&[(3, 3, Color::White), (0, 4, Color::Black)]);
        assert_eq!(centrality(&centre, Color::White), 3);
        assert!(evaluate(&centre, Color::White) > 0);
    }

    #[test]
    fn mobility_counts_moves() {
        let board = board_with(&[(3, 3, Color::White), (0, 4, Color::Black)]);
        // White: 4 steps. Black on the left edge: up, right, down.
        assert_eq!(mobility(&board, Color::White), 1);
    }

    #[test]
    fn huge_weights_stay_bounded() {
        let heuristic = Heuristic::new(EvalWeights {
            material: i32::MAX,
            centrality: i32::MAX,
            mobility: i32::MAX,
        });
        let board = board_with(&[(3, 3, Color::White), (4, 4, Color::White)]);
        assert_eq!(heuristic.evaluate(&board, Color::White), EVAL_BOUND);
        assert_eq!(heuristic.evaluate(&board, Color::Black), -EVAL_BOUND);
    }

    #[test]
    fn closures_are_evaluators() {
        let count_only = |b: &BoardState, c: Color| b.count(c) as Score;
        let board = board_with(&[(3, 3, Color::White)]);
        assert_eq!(count_only.evaluate(&board, Color::White), 1);
    }
}
