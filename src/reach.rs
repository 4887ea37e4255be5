// =============================================================================
// Reachability
//
// Pure movement geometry: can a piece standing on `from` move to `to` by its
// own movement rule? Whose turn it is and whether the mover's king would be
// left in check are both ignored here. The check detector is built on this
// layer and must never depend on full legality.
// =============================================================================

use crate::board::{Board, CastleSide, Square, KING_HOME_COL};
use crate::piece::{Piece, PieceType};
use crate::special;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

/// True iff `piece` on `from` could move to `to` by movement rules alone.
///
/// Off-board destinations and destinations holding a piece of the same
/// color are never reachable.
pub fn can_reach(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if !Board::on_board(from) || !Board::on_board(to) || from == to {
        return false;
    }
    if let Some(target) = board.piece_at(to) {
        if target.color == piece.color {
            return false;
        }
    }

    let dr = to.0 as i32 - from.0 as i32;
    let dc = to.1 as i32 - from.1 as i32;

    match piece.piece_type {
        PieceType::Pawn => pawn_reaches(board, piece, from, to, dr, dc),
        PieceType::Knight => KNIGHT_OFFSETS.contains(&(dr, dc)),
        PieceType::Bishop => dr.abs() == dc.abs() && ray_clear(board, from, dr, dc),
        PieceType::Rook => (dr == 0 || dc == 0) && ray_clear(board, from, dr, dc),
        PieceType::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && ray_clear(board, from, dr, dc)
        }
        PieceType::King => king_reaches(board, piece, from, to, dr, dc),
    }
}

fn pawn_reaches(board: &Board, piece: Piece, from: Square, to: Square, dr: i32, dc: i32) -> bool {
    let dir = piece.color.forward();
    let target = board.piece_at(to);

    // Single push
    if dc == 0 && dr == dir {
        return target.is_none();
    }

    // Double push from the home rank, both squares empty
    if dc == 0 && dr == 2 * dir {
        let skipped = ((from.0 as i32 + dir) as usize, from.1);
        return from.0 == piece.color.pawn_row()
            && board.piece_at(skipped).is_none()
            && target.is_none();
    }

    if dc.abs() == 1 && dr == dir {
        // Ordinary capture
        if target.is_some_and(|t| t.is_enemy_of(piece)) {
            return true;
        }
        // En passant onto the recorded target square
        return special::en_passant_victim(board, piece, from, to).is_some();
    }

    false
}

fn king_reaches(board: &Board, piece: Piece, from: Square, to: Square, dr: i32, dc: i32) -> bool {
    if dr.abs() <= 1 && dc.abs() <= 1 {
        return true;
    }

    // Castling only ever targets an empty square, so probing an occupied
    // king square from the check detector never reaches `can_castle`.
    if dr == 0 && dc.abs() == 2 && board.piece_at(to).is_none() {
        if from != (piece.color.home_row(), KING_HOME_COL) {
            return false;
        }
        let side = if dc > 0 { CastleSide::Kingside } else { CastleSide::Queenside };
        return special::can_castle(board, piece.color, side);
    }

    false
}

/// Every square strictly between `from` and `from + (dr, dc)` is empty.
/// The offset must be orthogonal or diagonal.
fn ray_clear(board: &Board, from: Square, dr: i32, dc: i32) -> bool {
    let (sr, sc) = (dr.signum(), dc.signum());
    let steps = dr.abs().max(dc.abs());
    (1..steps).all(|i| {
        let r = from.0 as i32 + i * sr;
        let c = from.1 as i32 + i * sc;
        Board::in_bounds(r, c) && board.squares[r as usize][c as usize].is_none()
    })
}
