//! Action notation as exchanged with the referee.
//!
//! - placement: `(c,r)`
//! - move: `((c,r),(c,r))`
//! - forfeit: `forfeit` (`None` is accepted on input)
//!
//! Whitespace is ignored when parsing. Notation is purely syntactic: whether
//! an action is legal is decided against a board by `Action::place` /
//! `Action::movement`.

use std::fmt;
use std::str::FromStr;

use crate::board::{Action, Coord};

/// Errors that can occur while parsing action notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("empty action")]
    Empty,

    #[error("malformed coordinate: '{0}'")]
    MalformedCoord(String),

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("coordinate ({0},{1}) is off the board")]
    OffBoard(i8, i8),

    #[error("malformed action: '{0}'")]
    Malformed(String),
}

/// A parsed referee action, not yet checked against any board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionNotation {
    Place(Coord),
    Move(Coord, Coord),
    Forfeit,
}

impl From<Action> for ActionNotation {
    fn from(action: Action) -> Self {
        match action {
            Action::Place(at) => ActionNotation::Place(at),
            Action::Move(mv) => ActionNotation::Move(mv.from(), mv.to()),
        }
    }
}

impl From<Option<Action>> for ActionNotation {
    fn from(action: Option<Action>) -> Self {
        action.map_or(ActionNotation::Forfeit, ActionNotation::from)
    }
}

impl fmt::Display for ActionNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionNotation::Place(at) => write!(f, "{}", at),
            ActionNotation::Move(from, to) => write!(f, "({},{})", from, to),
            ActionNotation::Forfeit => write!(f, "forfeit"),
        }
    }
}

impl FromStr for ActionNotation {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_action(s)
    }
}

/// Parses a coordinate of the form `(c,r)` (no whitespace).
fn parse_coord(s: &str) -> Result<Coord, NotationError> {
    let inner = s
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| NotationError::MalformedCoord(s.to_string()))?;
    let (col, row) = inner
        .split_once(',')
        .ok_or_else(|| NotationError::MalformedCoord(s.to_string()))?;
    let col: i8 = col
        .parse()
        .map_err(|_| NotationError::InvalidNumber(col.to_string()))?;
    let row: i8 = row
        .parse()
        .map_err(|_| NotationError::InvalidNumber(row.to_string()))?;
    let at = Coord::new(col, row);
    if !at.in_bounds() {
        return Err(NotationError::OffBoard(col, row));
    }
    Ok(at)
}

/// Parses one action in referee notation.
pub fn parse_action(input: &str) -> Result<ActionNotation, NotationError> {
    let s: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return Err(NotationError::Empty);
    }
    if s.eq_ignore_ascii_case("forfeit") || s == "None" {
        return Ok(ActionNotation::Forfeit);
    }

    if let Some(inner) = s.strip_prefix("((") {
        let inner = inner
            .strip_suffix("))")
            .ok_or_else(|| NotationError::Malformed(input.trim().to_string()))?;
        let (from, to) = inner
            .split_once("),(")
            .ok_or_else(|| NotationError::Malformed(input.trim().to_string()))?;
        let from = parse_coord(&format!("({})", from))?;
        let to = parse_coord(&format!("({})", to))?;
        return Ok(ActionNotation::Move(from, to));
    }

    if s.starts_with('(') {
        return parse_coord(&s).map(ActionNotation::Place);
    }

    Err(NotationError::Malformed(input.trim().to_string()))
}
