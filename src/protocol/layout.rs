//! Board layout notation.
//!
//! A layout is eight rows of eight symbols, top row first, joined by `/`:
//!
//! ```text
//! X------X/--------/---O----/---@----/--------/--------/--------/X------X
//! ```
//!
//! Symbols: `O` White, `@` Black, `X` corner, `-` empty, `#` inactive.
//! Inactive cells must form whole outer rings (the board after 0, 1 or 2
//! shrinks), and corners must sit exactly on the active square's corners.

use crate::board::{corners_for, BoardState, Cell, Coord, BOARD_SIZE, CELL_COUNT, MAX_SHRINKS};

const INACTIVE: char = '#';

/// Errors that can occur during layout parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("expected 8 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {len} cells, expected 8")]
    WrongRowLength { row: usize, len: usize },

    #[error("invalid cell symbol: '{0}'")]
    InvalidSymbol(char),

    #[error("inactive cells do not form whole rings at {0}")]
    RaggedRing(Coord),

    #[error("more than two rings are inactive")]
    TooManyRings,

    #[error("corner at {0} is not a corner of the active square")]
    MisplacedCorner(Coord),

    #[error("missing corner at {0}")]
    MissingCorner(Coord),
}

/// Parses a layout string into a board.
pub fn parse_layout(s: &str) -> Result<BoardState, LayoutError> {
    let rows: Vec<&str> = s.trim().split('/').collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(LayoutError::WrongRowCount(rows.len()));
    }

    let mut symbols = [INACTIVE; CELL_COUNT];
    for (r, row) in rows.iter().enumerate() {
        let chars: Vec<char> = row.chars().collect();
        if chars.len() != BOARD_SIZE as usize {
            return Err(LayoutError::WrongRowLength {
                row: r,
                len: chars.len(),
            });
        }
        for (c, &ch) in chars.iter().enumerate() {
            if ch != INACTIVE && Cell::from_symbol(ch).is_none() {
                return Err(LayoutError::InvalidSymbol(ch));
            }
            symbols[Coord::new(c as i8, r as i8).index()] = ch;
        }
    }

    // The number of dead rings is read off the diagonal.
    let shrinks = (0..BOARD_SIZE)
        .take_while(|&i| symbols[Coord::new(i, i).index()] == INACTIVE)
        .count() as u8;
    if shrinks > MAX_SHRINKS {
        return Err(LayoutError::TooManyRings);
    }

    let corners = corners_for(shrinks);
    let mut cells = [Cell::Empty; CELL_COUNT];
    for (idx, &ch) in symbols.iter().enumerate() {
        let at = Coord::from_index(idx);
        let inactive = at.ring() < shrinks;
        if inactive != (ch == INACTIVE) {
            return Err(LayoutError::RaggedRing(at));
        }
        if inactive {
            continue;
        }
        let cell = Cell::from_symbol(ch).ok_or(LayoutError::InvalidSymbol(ch))?;
        let is_corner = corners.contains(&at);
        match (cell, is_corner) {
            (Cell::Corner, false) => return Err(LayoutError::MisplacedCorner(at)),
            (Cell::Corner, true) => {}
            (_, true) => return Err(LayoutError::MissingCorner(at)),
            _ => {}
        }
        cells[idx] = cell;
    }

    Ok(BoardState::from_parts(cells, shrinks))
}

/// Encodes a board as a layout string.
pub fn encode_layout(board: &BoardState) -> String {
    let mut out = String::with_capacity(CELL_COUNT + 7);
    for row in 0..BOARD_SIZE {
        if row > 0 {
            out.push('/');
        }
        for col in 0..BOARD_SIZE {
            out.push(
                board
                    .output_piece(col, row)
                    .map_or(INACTIVE, |cell| cell.symbol()),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Action, Color};

    const START: &str = "X------X/--------/--------/--------/--------/--------/--------/X------X";

    #[test]
    fn empty_board_round_trip() {
        let board = parse_layout(START).unwrap();
        assert_eq!(board, BoardState::new());
        assert_eq!(encode_layout(&board), START);
    }

    #[test]
    fn pieces_are_placed() {
        let board =
            parse_layout("X------X/--------/--------/---O----/---@----/--------/--------/X------X")
                .unwrap();
        assert_eq!(board.output_piece(3, 3), Some(Cell::Piece(Color::White)));
        assert_eq!(board.output_piece(3, 4), Some(Cell::Piece(Color::Black)));
        assert_eq!(board.count(Color::White), 1);
    }

    #[test]
    fn shrunk_board_matches_shrink() {
        let mut board = BoardState::new();
        board.modify(&Action::Place(Coord::new(3, 3)), Color::White);
        board.shrink_board();
        let text = encode_layout(&board);
        assert_eq!(
            text,
            "########/#X----X#/#------#/#--O---#/#------#/#------#/#X----X#/########"
        );
        assert_eq!(parse_layout(&text).unwrap(), board);
    }

    #[test]
    fn rejects_malformed_layouts() {
        assert_eq!(parse_layout("X------X"), Err(LayoutError::WrongRowCount(1)));
        assert_eq!(
            parse_layout("X-----X/--------/--------/--------/--------/--------/--------/X------X"),
            Err(LayoutError::WrongRowLength { row: 0, len: 7 })
        );
        assert_eq!(
            parse_layout("X------X/--------/---Q----/--------/--------/--------/--------/X------X"),
            Err(LayoutError::InvalidSymbol('Q'))
        );
        assert_eq!(
            parse_layout("X------X/--------/--------/---X----/--------/--------/--------/X------X"),
            Err(LayoutError::MisplacedCorner(Coord::new(3, 3)))
        );
        assert_eq!(
            parse_layout("-------X/--------/--------/--------/--------/--------/--------/X------X"),
            Err(LayoutError::MissingCorner(Coord::new(0, 0)))
        );
        assert_eq!(
            parse_layout("#------X/--------/--------/--------/--------/--------/--------/X------X"),
            Err(LayoutError::RaggedRing(Coord::new(1, 0)))
        );
        assert_eq!(
            parse_layout("########/########/########/###XX###/###XX###/########/########/########"),
            Err(LayoutError::TooManyRings)
        );
    }
}
