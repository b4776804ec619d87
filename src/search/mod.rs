//! Search and planning.
//!
//! Depth-limited minimax with alpha-beta pruning over the moving phase.

pub mod alphabeta;

pub use alphabeta::{alphabeta_cutoff_search, SearchLimits, SearchNode, SearchResult};
