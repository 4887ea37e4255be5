// =============================================================================
// Special moves
//
// Castling eligibility and execution, en passant capture, promotion, and the
// single `commit` step that writes a move and all of its side effects onto a
// board. `commit` is used both for trial boards and for the live board once
// a move has been confirmed legal.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::board::{Board, CastleSide, Square, KING_HOME_COL};
use crate::check;
use crate::error::GameError;
use crate::piece::{Color, Piece, PieceType};

/// Pieces a pawn may promote to.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum PromotionChoice {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionChoice {
    pub const ALL: [PromotionChoice; 4] = [
        PromotionChoice::Queen,
        PromotionChoice::Rook,
        PromotionChoice::Bishop,
        PromotionChoice::Knight,
    ];

    pub fn piece_type(self) -> PieceType {
        match self {
            PromotionChoice::Queen => PieceType::Queen,
            PromotionChoice::Rook => PieceType::Rook,
            PromotionChoice::Bishop => PieceType::Bishop,
            PromotionChoice::Knight => PieceType::Knight,
        }
    }
}

impl TryFrom<PieceType> for PromotionChoice {
    type Error = GameError;

    fn try_from(pt: PieceType) -> Result<Self, Self::Error> {
        match pt {
            PieceType::Queen => Ok(PromotionChoice::Queen),
            PieceType::Rook => Ok(PromotionChoice::Rook),
            PieceType::Bishop => Ok(PromotionChoice::Bishop),
            PieceType::Knight => Ok(PromotionChoice::Knight),
            other => Err(GameError::InvalidPromotionPiece(other)),
        }
    }
}

/// What a committed move did besides relocating the moving piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveEffects {
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub en_passant: bool,
    pub castled: Option<CastleSide>,
    pub promotion_pending: bool,
}

/// Castling eligibility for `color` on `side`.
///
/// Requires that neither the king nor that rook has ever moved, that both
/// still stand on their home squares, that every square between them is
/// empty, and that the king's current, transit and final squares are not
/// attacked.
pub fn can_castle(board: &Board, color: Color, side: CastleSide) -> bool {
    if board.castling.king_moved(color) || board.castling.rook_moved(color, side) {
        return false;
    }

    let row = color.home_row();
    let king = Piece::new(PieceType::King, color);
    let rook = Piece::new(PieceType::Rook, color);
    if board.piece_at((row, KING_HOME_COL)) != Some(king)
        || board.piece_at((row, side.rook_col())) != Some(rook)
    {
        return false;
    }

    let (lo, hi) = if side.rook_col() > KING_HOME_COL {
        (KING_HOME_COL + 1, side.rook_col())
    } else {
        (side.rook_col() + 1, KING_HOME_COL)
    };
    if (lo..hi).any(|c| board.squares[row][c].is_some()) {
        return false;
    }

    // Current square, transit square and landing square.
    (0..=2).all(|i| {
        let col = (KING_HOME_COL as i32 + i * side.step()) as usize;
        let mut scratch = board.clone();
        scratch.set((row, KING_HOME_COL), None);
        scratch.set((row, col), Some(king));
        !check::is_king_in_check(&scratch, color)
    })
}

/// Square of the pawn captured en passant if `piece` moving `from` -> `to`
/// is an en passant capture on this board.
pub fn en_passant_victim(board: &Board, piece: Piece, from: Square, to: Square) -> Option<Square> {
    if piece.piece_type != PieceType::Pawn
        || from.1 == to.1
        || board.en_passant_target != Some(to)
        || board.piece_at(to).is_some()
    {
        return None;
    }
    let victim_sq = (from.0, to.1);
    match board.piece_at(victim_sq) {
        Some(v) if v.piece_type == PieceType::Pawn && v.is_enemy_of(piece) => Some(victim_sq),
        _ => None,
    }
}

/// Side being castled if `piece` moving `from` -> `to` is a castling move.
pub fn castle_side(piece: Piece, from: Square, to: Square) -> Option<CastleSide> {
    if piece.piece_type != PieceType::King || from.0 != to.0 {
        return None;
    }
    match to.1 as i32 - from.1 as i32 {
        2 => Some(CastleSide::Kingside),
        -2 => Some(CastleSide::Queenside),
        _ => None,
    }
}

pub fn is_promotion(piece: Piece, to: Square) -> bool {
    piece.piece_type == PieceType::Pawn && to.0 == piece.color.promotion_row()
}

/// Mark the castling flags a move from `from` disturbs. Flags only ever go
/// from `false` to `true`.
pub fn record_castling_flags(board: &mut Board, piece: Piece, from: Square) {
    let color = piece.color;
    match piece.piece_type {
        PieceType::King => board.castling.mark_king_moved(color),
        PieceType::Rook if from.0 == color.home_row() => {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if from.1 == side.rook_col() {
                    board.castling.mark_rook_moved(color, side);
                }
            }
        }
        _ => {}
    }
}

/// A rook taken on its corner takes that side's castling right with it.
fn record_rook_capture(board: &mut Board, taken: Piece, at: Square) {
    if taken.piece_type != PieceType::Rook || at.0 != taken.color.home_row() {
        return;
    }
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if at.1 == side.rook_col() {
            board.castling.mark_rook_moved(taken.color, side);
        }
    }
}

/// Write `piece` moving `from` -> `to` onto `board` with all side effects:
/// capture by overwrite, en passant removal, rook relocation for castling,
/// castling flags (including those of a rook captured on its corner) and the
/// en passant target for the next ply.
///
/// Turn order and promotion are left to the caller. No legality checks
/// happen here.
pub fn commit(board: &mut Board, piece: Piece, from: Square, to: Square) -> MoveEffects {
    let victim = en_passant_victim(board, piece, from, to);
    let mut captured = board.piece_at(to);
    if let Some(taken) = captured {
        record_rook_capture(board, taken, to);
    }
    if let Some(sq) = victim {
        captured = board.piece_at(sq);
        board.set(sq, None);
    }

    board.set(to, Some(piece));
    board.set(from, None);

    let castled = castle_side(piece, from, to);
    if let Some(side) = castled {
        let row = from.0;
        let rook = board.piece_at((row, side.rook_col()));
        board.set((row, side.rook_col()), None);
        board.set((row, side.rook_target_col()), rook);
    }

    record_castling_flags(board, piece, from);

    board.en_passant_target = if piece.piece_type == PieceType::Pawn && from.0.abs_diff(to.0) == 2 {
        Some(((from.0 + to.0) / 2, from.1))
    } else {
        None
    };

    MoveEffects {
        moved: piece,
        captured,
        en_passant: victim.is_some(),
        castled,
        promotion_pending: is_promotion(piece, to),
    }
}

/// Replace the pawn on `sq` with the chosen piece of the same color.
pub fn promote(board: &mut Board, sq: Square, choice: PromotionChoice) -> Result<Piece, GameError> {
    match board.piece_at(sq) {
        Some(p) if is_promotion(p, sq) => {
            let promoted = Piece::new(choice.piece_type(), p.color);
            board.set(sq, Some(promoted));
            Ok(promoted)
        }
        _ => Err(GameError::PromotionSquareMismatch(sq)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// White king and both rooks on their home squares, black king in the corner.
    fn castling_board() -> Board {
        let mut codes = [[0i8; 8]; 8];
        codes[7][0] = 4;
        codes[7][4] = 6;
        codes[7][7] = 4;
        codes[0][0] = -6;
        Board::from_codes(codes, Color::White)
    }

    #[test]
    fn cannot_castle_from_initial_position() {
        let board = Board::new();
        for color in [Color::White, Color::Black] {
            assert!(!can_castle(&board, color, CastleSide::Kingside));
            assert!(!can_castle(&board, color, CastleSide::Queenside));
        }
    }

    #[test]
    fn castling_with_clear_path() {
        let board = castling_board();
        assert!(can_castle(&board, Color::White, CastleSide::Kingside));
        assert!(can_castle(&board, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn moved_flags_forbid_castling() {
        let mut board = castling_board();
        board.castling.mark_rook_moved(Color::White, CastleSide::Kingside);
        assert!(!can_castle(&board, Color::White, CastleSide::Kingside));
        assert!(can_castle(&board, Color::White, CastleSide::Queenside));
        board.castling.mark_king_moved(Color::White);
        assert!(!can_castle(&board, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn cannot_castle_out_of_through_or_into_check() {
        // Rook on the e-file: king currently in check.
        let mut board = castling_board();
        board.set((0, 4), Some(Piece::new(PieceType::Rook, Color::Black)));
        assert!(!can_castle(&board, Color::White, CastleSide::Kingside));

        // Rook on the f-file: transit square attacked.
        let mut board = castling_board();
        board.set((0, 5), Some(Piece::new(PieceType::Rook, Color::Black)));
        assert!(!can_castle(&board, Color::White, CastleSide::Kingside));
        assert!(can_castle(&board, Color::White, CastleSide::Queenside));

        // Rook on the g-file: landing square attacked.
        let mut board = castling_board();
        board.set((0, 6), Some(Piece::new(PieceType::Rook, Color::Black)));
        assert!(!can_castle(&board, Color::White, CastleSide::Kingside));

        // Rook on the b-file: b1 only has to be empty, not safe.
        let mut board = castling_board();
        board.set((0, 1), Some(Piece::new(PieceType::Rook, Color::Black)));
        assert!(can_castle(&board, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn missing_rook_forbids_castling() {
        let mut board = castling_board();
        board.set((7, 7), None);
        assert!(!can_castle(&board, Color::White, CastleSide::Kingside));
    }

    #[test]
    fn commit_castling_relocates_rook() {
        let mut board = castling_board();
        let king = Piece::new(PieceType::King, Color::White);
        let fx = commit(&mut board, king, (7, 4), (7, 2));
        assert_eq!(fx.castled, Some(CastleSide::Queenside));
        assert_eq!(board.piece_at((7, 2)), Some(king));
        assert_eq!(board.piece_at((7, 3)), Some(Piece::new(PieceType::Rook, Color::White)));
        assert_eq!(board.piece_at((7, 0)), None);
        assert!(board.castling.white_king_moved);
    }

    #[test]
    fn commit_en_passant_removes_passed_pawn() {
        let mut codes = [[0i8; 8]; 8];
        codes[3][4] = 1;
        codes[3][3] = -1;
        let mut board = Board::from_codes(codes, Color::White);
        board.en_passant_target = Some((2, 3));
        let wp = Piece::new(PieceType::Pawn, Color::White);
        let fx = commit(&mut board, wp, (3, 4), (2, 3));
        assert!(fx.en_passant);
        assert_eq!(fx.captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert_eq!(board.piece_at((3, 3)), None);
        assert_eq!(board.piece_at((2, 3)), Some(wp));
        assert_eq!(board.en_passant_target, None);
    }

    #[test]
    fn rook_leaving_a_non_home_square_keeps_flags() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceType::Rook, Color::White);
        board.set((4, 7), Some(rook));
        commit(&mut board, rook, (4, 7), (4, 5));
        assert_eq!(board.castling.as_array(), [false; 6]);
    }

    #[test]
    fn capturing_a_corner_rook_revokes_its_castling_right() {
        let mut board = castling_board();
        let bishop = Piece::new(PieceType::Bishop, Color::Black);
        board.set((2, 2), Some(bishop));
        let fx = commit(&mut board, bishop, (2, 2), (7, 7));
        assert_eq!(fx.captured, Some(Piece::new(PieceType::Rook, Color::White)));
        assert!(board.castling.white_kingside_rook_moved);
        assert!(!board.castling.white_queenside_rook_moved);
        assert!(!board.castling.white_king_moved);

        // Another rook arriving on the corner does not bring the right back.
        let rook = Piece::new(PieceType::Rook, Color::White);
        board.set((7, 7), Some(rook));
        assert!(!can_castle(&board, Color::White, CastleSide::Kingside));
        assert!(can_castle(&board, Color::White, CastleSide::Queenside));
    }

    #[test]
    fn promotion_choice_rejects_pawn_and_king() {
        assert!(PromotionChoice::try_from(PieceType::King).is_err());
        assert!(PromotionChoice::try_from(PieceType::Pawn).is_err());
        assert_eq!(PromotionChoice::try_from(PieceType::Knight).ok(), Some(PromotionChoice::Knight));
    }

    #[test]
    fn promote_only_a_pawn_on_its_last_rank() {
        let mut board = Board::empty();
        board.set((0, 2), Some(Piece::new(PieceType::Pawn, Color::White)));
        board.set((7, 2), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert!(promote(&mut board, (7, 2), PromotionChoice::Queen).is_err());
        let promoted = promote(&mut board, (0, 2), PromotionChoice::Rook).ok();
        assert_eq!(promoted, Some(Piece::new(PieceType::Rook, Color::White)));
        assert_eq!(board.piece_at((0, 2)), promoted);
    }
}
