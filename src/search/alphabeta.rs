//! Minimax search with alpha-beta pruning and a depth cutoff.
//!
//! The side to move at the root is the maximiser and plies alternate. A
//! node stops expanding when the game is over, when its side to move has no
//! legal move, when the depth is exhausted, or when the optional time
//! budget has run out. Children are explored in move-generator order and
//! only a strict improvement replaces the best root move, so the result is
//! a pure function of `(board, side to move, depth)` when no time budget is
//! set.

use std::io::Write;
use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Action, BoardState, Color, Move, Outcome};
use crate::eval::{Evaluator, Score, WIN_SCORE};
use crate::movegen::generate_moves;

/// Bound used for the initial alpha-beta window.
const INFINITY: Score = WIN_SCORE * 2;

/// A board plus the side to move. Lives only for the duration of a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchNode {
    pub board: BoardState,
    pub to_move: Color,
}

impl SearchNode {
    pub fn new(board: BoardState, to_move: Color) -> Self {
        SearchNode { board, to_move }
    }

    /// The node reached by playing `mv` for the side to move.
    pub fn child(&self, mv: &Move) -> SearchNode {
        let mut board = self.board.clone();
        board.modify(&Action::Move(*mv), self.to_move);
        SearchNode {
            board,
            to_move: self.to_move.opponent(),
        }
    }
}

/// Search constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum plies to look ahead. Zero is treated as one.
    pub depth: u32,
    /// Wall-clock budget; nodes reached after it expires are evaluated statically.
    pub movetime: Option<Duration>,
}

impl SearchLimits {
    /// Depth-only limits (fully deterministic).
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth,
            movetime: None,
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::depth(3)
    }
}

/// Result of a search: the chosen move and associated info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the root side has no legal move (forfeit).
    pub best: Option<Move>,
    pub score: Score,
    pub nodes: u64,
}

/// What to do at a node: stop with a value or expand these moves.
enum Expansion {
    Leaf(Score),
    Children(Vec<Move>),
}

struct Searcher<'a, E> {
    root: Color,
    evaluator: &'a E,
    nodes: u64,
    deadline: Option<Instant>,
}

impl<E: Evaluator> Searcher<'_, E> {
    fn expand(&mut self, node: &SearchNode, depth: u32) -> Expansion {
        self.nodes += 1;

        if let Some(outcome) = node.board.outcome() {
            return Expansion::Leaf(match outcome {
                Outcome::Winner(c) if c == self.root => WIN_SCORE,
                Outcome::Winner(_) => -WIN_SCORE,
                Outcome::Draw => 0,
            });
        }

        let moves = generate_moves(&node.board, node.to_move);
        if moves.is_empty() {
            // No legal move counts against the side that has to move.
            return Expansion::Leaf(if node.to_move == self.root {
                -WIN_SCORE
            } else {
                WIN_SCORE
            });
        }

        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        if depth == 0 || expired {
            return Expansion::Leaf(self.evaluator.evaluate(&node.board, self.root));
        }

        Expansion::Children(moves)
    }

    fn max_value(&mut self, node: &SearchNode, mut alpha: Score, beta: Score, depth: u32) -> Score {
        let moves = match self.expand(node, depth) {
            Expansion::Leaf(v) => return v,
            Expansion::Children(moves) => moves,
        };
        let mut value = -INFINITY;
        for mv in &moves {
            value = value.max(self.min_value(&node.child(mv), alpha, beta, depth - 1));
            if value >= beta {
                return value;
            }
            alpha = alpha.max(value);
        }
        value
    }

    fn min_value(&mut self, node: &SearchNode, alpha: Score, mut beta: Score, depth: u32) -> Score {
        let moves = match self.expand(node, depth) {
            Expansion::Leaf(v) => return v,
            Expansion::Children(moves) => moves,
        };
        let mut value = INFINITY;
        for mv in &moves {
            value = value.min(self.max_value(&node.child(mv), alpha, beta, depth - 1));
            if value <= alpha {
                return value;
            }
            beta = beta.min(value);
        }
        value
    }
}

/// Finds the best move for `node.to_move` within `limits`.
///
/// Scores are from the root side's perspective. Ties between root moves go
/// to the one generated first. Emits one `info` line to `out`.
pub fn alphabeta_cutoff_search<E: Evaluator, W: Write>(
    node: &SearchNode,
    limits: &SearchLimits,
    evaluator: &E,
    out: &mut W,
) -> SearchResult {
    let start = Instant::now();
    let depth = limits.depth.max(1);
    let mut searcher = Searcher {
        root: node.to_move,
        evaluator,
        nodes: 1,
        deadline: limits.movetime.map(|t| start + t),
    };

    let mut best = None;
    let mut best_score = -INFINITY;
    let mut alpha = -INFINITY;
    for mv in generate_moves(&node.board, node.to_move) {
        let value = searcher.min_value(&node.child(&mv), alpha, INFINITY, depth - 1);
        if value > best_score {
            best_score = value;
            best = Some(mv);
        }
        alpha = alpha.max(best_score);
    }
    if best.is_none() {
        best_score = -WIN_SCORE;
    }

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let _ = writeln!(
        out,
        "info depth {} nodes {} score {} time {}",
        depth, searcher.nodes, best_score, elapsed_ms
    );
    debug!(
        "{} search depth {}: {:?} score {} ({} nodes, {}ms)",
        node.to_move, depth, best, best_score, searcher.nodes, elapsed_ms
    );

    SearchResult {
        best,
        score: best_score,
        nodes: searcher.nodes,
    }
}
