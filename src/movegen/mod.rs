//! Legal move generation.
//!
//! Enumerates the legal moves of a colour in the moving phase and the
//! legal placement cells in the placing phase. Both lists come out in a
//! stable order so that search and tie-breaking are reproducible.

use crate::board::{BoardState, Cell, Color, Coord, Move, BOARD_SIZE, DIRECTIONS};

/// Generates every legal move for `color`.
///
/// Pieces are visited in `search_board` order and directions in
/// `DIRECTIONS` order. For each direction a piece may step onto an empty
/// active neighbour, or jump over an occupying piece of either colour onto
/// the empty active cell beyond it. An empty result means `color` must
/// forfeit its turn.
pub fn generate_moves(board: &BoardState, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();

    for from in board.search_board(color) {
        for dir in DIRECTIONS {
            let step = from.offset(dir, 1);
            match board.cell(step) {
                Some(Cell::Empty) => moves.push(Move::unchecked(from, step)),
                Some(Cell::Piece(_)) => {
                    let jump = from.offset(dir, 2);
                    if board.is_vacant(jump) {
                        moves.push(Move::unchecked(from, jump));
                    }
                }
                _ => {}
            }
        }
    }

    moves
}

/// Empty active cells inside `color`'s placing zone, in row-major order.
pub fn legal_placements(board: &BoardState, color: Color) -> Vec<Coord> {
    let (lo, hi) = color.placing_rows();
    let mut cells = Vec::new();
    for row in lo..=hi {
        for col in 0..BOARD_SIZE {
            let at = Coord::new(col, row);
            if board.is_vacant(at) {
                cells.push(at);
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Action, InvalidMove};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn board_with(pieces: &[(i8, i8, Color)]) -> BoardState {
        let mut board = BoardState::new();
        for &(col, row, color) in pieces {
            board.put(Coord::new(col, row), Cell::Piece(color));
        }
        board
    }

    /// Plays a random placing phase followed by random moves.
    fn random_board(seed: u64, moves: usize) -> BoardState {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = BoardState::new();
        for _ in 0..12 {
            for color in [Color::White, Color::Black] {
                let cells = legal_placements(&board, color);
                let at = cells[rng.gen_range(0..cells.len())];
                let action = Action::place(&board, color, at).unwrap();
                board.modify(&action, color);
            }
        }
        let mut color = Color::White;
        for _ in 0..moves {
            let legal = generate_moves(&board, color);
            if !legal.is_empty() {
                let mv = legal[rng.gen_range(0..legal.len())];
                board.modify(&Action::Move(mv), color);
            }
            color = color.opponent();
        }
        board
    }

    #[test]
    fn step_and_jump_scenario() {
        let board = board_with(&[(3, 3, Color::White), (3, 4, Color::Black)]);
        let moves = generate_moves(&board, Color::Black);
        let dests: Vec<Coord> = moves.iter().map(|m| m.to()).collect();
        assert_eq!(
            dests,
            vec![
                Coord::new(3, 2), // jump over White
                Coord::new(4, 4),
                Coord::new(3, 5),
                Coord::new(2, 4),
            ]
        );
        assert_eq!(
            Move::new(&board, Color::Black, Coord::new(3, 4), Coord::new(3, 3)),
            Err(InvalidMove::Occupied(Coord::new(3, 3)))
        );
    }

    #[test]
    fn blocked_jump_is_not_generated() {
        let board = board_with(&[
            (3, 3, Color::White),
            (3, 2, Color::Black),
            (3, 1, Color::Black),
        ]);
        let moves = generate_moves(&board, Color::White);
        assert!(moves.iter().all(|m| m.to() != Coord::new(3, 1)));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn cornered_piece_has_no_moves() {
        // (1,0) between corner and White, with (1,1) occupied and (1,2) occupied.
        let board = board_with(&[
            (1, 0, Color::Black),
            (2, 0, Color::White),
            (3, 0, Color::White),
            (1, 1, Color::White),
            (1, 2, Color::White),
        ]);
        assert!(generate_moves(&board, Color::Black).is_empty());
        assert!(!generate_moves(&board, Color::White).is_empty());
    }

    #[test]
    fn generated_moves_are_legal_on_random_boards() {
        for seed in 0..40 {
            let board = random_board(seed, (seed as usize) * 3);
            for color in [Color::White, Color::Black] {
                let moves = generate_moves(&board, color);
                for mv in &moves {
                    assert_eq!(board.cell(mv.from()), Some(Cell::Piece(color)));
                    assert!(board.is_vacant(mv.to()), "seed {} {:?}", seed, mv);
                    assert_eq!(Move::new(&board, color, mv.from(), mv.to()), Ok(*mv));
                }
                let mut dedup = moves.clone();
                dedup.sort_by_key(|m| (m.from(), m.to()));
                dedup.dedup();
                assert_eq!(dedup.len(), moves.len());
            }
        }
    }

    #[test]
    fn generation_order_is_stable() {
        let board = random_board(7, 20);
        assert_eq!(
            generate_moves(&board, Color::White),
            generate_moves(&board.clone(), Color::White)
        );
    }

    #[test]
    fn no_destination_inside_shrunk_ring() {
        for seed in 0..20 {
            let mut board = random_board(seed, 10);
            board.shrink_board();
            for color in [Color::White, Color::Black] {
                for mv in generate_moves(&board, color) {
                    assert!(mv.to().ring() >= 1, "seed {} {:?}", seed, mv);
                }
            }
            board.shrink_board();
            for color in [Color::White, Color::Black] {
                for mv in generate_moves(&board, color) {
                    assert!(mv.to().ring() >= 2, "seed {} {:?}", seed, mv);
                }
            }
        }
    }

    #[test]
    fn placements_stay_in_zone() {
        let board = BoardState::new();
        let white = legal_placements(&board, Color::White);
        // 6 rows of 8, minus the two top corners.
        assert_eq!(white.len(), 46);
        assert!(white.iter().all(|c| c.row <= 5));
        let black = legal_placements(&board, Color::Black);
        assert_eq!(black.len(), 46);
        assert!(black.iter().all(|c| c.row >= 2));
    }
}
