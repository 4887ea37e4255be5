use std::collections::BTreeSet;

use crate::board::{Board, Square};
use crate::check;
use crate::error::Rejection;
use crate::moves::Move;
use crate::piece::{Color, Piece};
use crate::reach;
use crate::special::{self, PromotionChoice};

/// Full legality: reachable by movement rules and not leaving the mover's
/// own king in check.
pub fn is_legal(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    check_move(board, piece, from, to).is_ok()
}

/// Same as [`is_legal`] but reports the reason for a rejection.
///
/// Reasons are checked in order: destination, geometry, king safety.
pub fn check_move(board: &Board, piece: Piece, from: Square, to: Square) -> Result<(), Rejection> {
    if !Board::on_board(to) || board.piece_at(to).is_some_and(|t| t.color == piece.color) {
        return Err(Rejection::InvalidDestination);
    }
    if !reach::can_reach(board, piece, from, to) {
        return Err(Rejection::IllegalGeometry);
    }
    if leaves_king_in_check(board, piece, from, to) {
        return Err(Rejection::SelfCheckViolation);
    }
    Ok(())
}

/// Classify a move of whatever stands on `from`.
pub fn classify(board: &Board, from: Square, to: Square) -> Result<Piece, Rejection> {
    let piece = board.piece_at(from).ok_or(Rejection::NoSelection)?;
    check_move(board, piece, from, to)?;
    Ok(piece)
}

/// Would the mover's king be attacked after this move? Probed on a scratch
/// board, so pins, discovered checks and king walks into attacked squares
/// all surface here.
pub fn leaves_king_in_check(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let scratch = board.trial_move(piece, from, to);
    check::is_king_in_check(&scratch, piece.color)
}

/// Every square the piece on `from` may legally move to, ignoring whose turn it is.
pub fn legal_moves(board: &Board, from: Square) -> BTreeSet<Square> {
    let Some(piece) = board.piece_at(from) else {
        return BTreeSet::new();
    };
    all_squares()
        .filter(|&to| is_legal(board, piece, from, to))
        .collect()
}

/// Every legal move for `color`, with one entry per promotion choice when a
/// pawn reaches its last rank.
pub fn all_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces_of(color) {
        for to in legal_moves(board, from) {
            if special::is_promotion(piece, to) {
                for choice in PromotionChoice::ALL {
                    moves.push(Move { from, to, promotion: Some(choice.piece_type()) });
                }
            } else {
                moves.push(Move { from, to, promotion: None });
            }
        }
    }
    moves
}

pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(from, piece)| all_squares().any(|to| is_legal(board, piece, from, to)))
}

fn all_squares() -> impl Iterator<Item = Square> {
    (0..8usize).flat_map(|r| (0..8usize).map(move |c| (r, c)))
}
