//! flanker engine library.
//!
//! Board model, move generation, evaluation, alpha-beta search and the
//! fallback policies for *Watch Your Back!*, plus the referee protocol and
//! self-play driver used by the binaries and integration tests.

pub mod board;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod phase;
pub mod protocol;
pub mod search;
pub mod selfplay;
pub mod strategy;
