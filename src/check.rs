// =============================================================================
// Check / checkmate detection
//
// Check is decided with raw reachability only (`reach::can_reach`), never with
// full legality: legality depends on king safety, so king safety must not
// depend on legality.
//
// Checkmate is a plain exhaustive scan over (own piece, destination) pairs,
// each tried on a scratch board. That is O(64 x 64) legality probes per call,
// which is fine at human pace and not meant for tree search.
// =============================================================================

use crate::board::{Board, Square};
use crate::legality;
use crate::piece::Color;
use crate::reach;

/// Squares of the enemy pieces currently attacking `color`'s king.
/// Empty when the king is missing.
pub fn checkers(board: &Board, color: Color) -> Vec<Square> {
    checkers_iter(board, color).collect()
}

fn checkers_iter(board: &Board, color: Color) -> impl Iterator<Item = Square> + '_ {
    let king_sq = board.find_king(color);
    king_sq
        .into_iter()
        .flat_map(move |k| {
            board
                .pieces_of(color.opposite())
                .filter(move |&(sq, p)| reach::can_reach(board, p, sq, k))
        })
        .map(|(sq, _)| sq)
}

/// True iff some enemy piece can reach `color`'s king. A board without
/// that king is never in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    checkers_iter(board, color).next().is_some()
}

/// In check and no legal reply removes the check. Every legal move already
/// leaves the king safe, so any legal move at all is an escape.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_king_in_check(board, color) && !legality::has_any_legal_move(board, color)
}

/// Not in check but without a single legal move.
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    board.find_king(color).is_some()
        && !is_king_in_check(board, color)
        && !legality::has_any_legal_move(board, color)
}

/// Convenience for renderers: the square to highlight when `color` is in check.
pub fn king_in_check_square(board: &Board, color: Color) -> Option<Square> {
    if is_king_in_check(board, color) {
        board.find_king(color)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceType};

    #[test]
    fn open_file_rook_gives_check() {
        let mut codes = [[0i8; 8]; 8];
        codes[7][4] = 6;
        codes[0][4] = -4;
        codes[0][0] = -6;
        let board = Board::from_codes(codes, Color::White);
        assert!(is_king_in_check(&board, Color::White));
        assert_eq!(checkers(&board, Color::White), vec![(0, 4)]);
        assert_eq!(king_in_check_square(&board, Color::White), Some((7, 4)));
        assert!(!is_king_in_check(&board, Color::Black));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let mut board = Board::empty();
        board.set((0, 0), Some(Piece::new(PieceType::Queen, Color::Black)));
        assert!(!is_king_in_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White));
        assert!(!is_stalemate(&board, Color::White));
    }

    #[test]
    fn back_rank_mate() {
        // Ke1 boxed in by its own pawns and rooks, none of which can reach the e-file.
        let mut codes = [[0i8; 8]; 8];
        codes[7][4] = 6; // Ke1
        codes[6][3] = 1; // d2
        codes[6][5] = 1; // f2
        codes[7][3] = 4; // Rd1
        codes[7][5] = 4; // Rf1
        codes[0][4] = -5; // Qe8
        codes[0][0] = -6; // Ka8
        let board = Board::from_codes(codes, Color::White);
        assert!(is_king_in_check(&board, Color::White));
        assert!(is_checkmate(&board, Color::White));
    }

    #[test]
    fn check_that_can_be_blocked_is_not_mate() {
        let mut codes = [[0i8; 8]; 8];
        codes[7][4] = 6;
        codes[6][3] = 1;
        codes[6][5] = 1;
        codes[7][3] = 4;
        codes[7][5] = 4;
        codes[4][0] = 4; // Ra4 can interpose on e4
        codes[0][4] = -5;
        codes[0][0] = -6;
        let board = Board::from_codes(codes, Color::White);
        assert!(is_king_in_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White));
    }

    #[test]
    fn queen_and_king_stalemate() {
        // Black Ka8 against Qc7 and Kb6: black to move has nothing.
        let mut codes = [[0i8; 8]; 8];
        codes[0][0] = -6; // Ka8
        codes[1][2] = 5; // Qc7
        codes[2][1] = 6; // Kb6
        let board = Board::from_codes(codes, Color::Black);
        assert!(!is_king_in_check(&board, Color::Black));
        assert!(is_stalemate(&board, Color::Black));
        assert!(!is_checkmate(&board, Color::Black));
    }

    #[test]
    fn probes_never_touch_the_board() {
        let mut codes = [[0i8; 8]; 8];
        codes[7][4] = 6;
        codes[6][3] = 1;
        codes[6][5] = 1;
        codes[0][4] = -5;
        codes[0][0] = -6;
        let board = Board::from_codes(codes, Color::White);
        let before = board.clone();
        let _ = is_checkmate(&board, Color::White);
        let _ = is_stalemate(&board, Color::Black);
        assert_eq!(board, before);
    }
}
