use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::{Color, Piece, PieceType};
use crate::special;

/// A board coordinate as `(row, col)`. Row 0 is black's back rank, col 0 is the a-file.
pub type Square = (usize, usize);

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub fn rook_col(self) -> usize {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column the king lands on.
    pub fn king_target_col(self) -> usize {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Column the rook lands on, adjacent to the castled king.
    pub fn rook_target_col(self) -> usize {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    pub fn step(self) -> i32 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

/// Column both kings start on.
pub const KING_HOME_COL: usize = 4;

/// "Has moved" markers for the pieces that take part in castling.
///
/// Every flag is monotonic: once set it stays set for the rest of the game.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingFlags {
    pub white_king_moved: bool,
    pub white_kingside_rook_moved: bool,
    pub white_queenside_rook_moved: bool,
    pub black_king_moved: bool,
    pub black_kingside_rook_moved: bool,
    pub black_queenside_rook_moved: bool,
}

impl CastlingFlags {
    pub fn king_moved(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_moved,
            Color::Black => self.black_king_moved,
        }
    }

    pub fn rook_moved(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside_rook_moved,
            (Color::White, CastleSide::Queenside) => self.white_queenside_rook_moved,
            (Color::Black, CastleSide::Kingside) => self.black_kingside_rook_moved,
            (Color::Black, CastleSide::Queenside) => self.black_queenside_rook_moved,
        }
    }

    pub fn mark_king_moved(&mut self, color: Color) {
        match color {
            Color::White => self.white_king_moved = true,
            Color::Black => self.black_king_moved = true,
        }
    }

    pub fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside_rook_moved = true,
            (Color::White, CastleSide::Queenside) => self.white_queenside_rook_moved = true,
            (Color::Black, CastleSide::Kingside) => self.black_kingside_rook_moved = true,
            (Color::Black, CastleSide::Queenside) => self.black_queenside_rook_moved = true,
        }
    }

    /// Flags as a fixed-order array, used to compare states flag by flag.
    pub fn as_array(&self) -> [bool; 6] {
        [
            self.white_king_moved,
            self.white_kingside_rook_moved,
            self.white_queenside_rook_moved,
            self.black_king_moved,
            self.black_kingside_rook_moved,
            self.black_queenside_rook_moved,
        ]
    }
}

/// Complete rules state of one game: placement, castling flags, en passant
/// target and side to move.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
    pub current_turn: Color,
    pub castling: CastlingFlags,
    pub en_passant_target: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

const INITIAL_CODES: [[i8; 8]; 8] = [
    [-4, -2, -3, -5, -6, -3, -2, -4],
    [-1, -1, -1, -1, -1, -1, -1, -1],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [4, 2, 3, 5, 6, 3, 2, 4],
];

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            current_turn: Color::White,
            castling: CastlingFlags::default(),
            en_passant_target: None,
        }
    }

    pub fn new() -> Self {
        Self::from_codes(INITIAL_CODES, Color::White)
    }

    /// Build a position from signed piece codes (see [`Piece::code`]).
    /// Codes outside -6..=6 are treated as empty squares.
    pub fn from_codes(codes: [[i8; 8]; 8], current_turn: Color) -> Self {
        let mut board = Board::empty();
        for (r, row) in codes.iter().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                board.squares[r][c] = Piece::from_code(code);
            }
        }
        board.current_turn = current_turn;
        board
    }

    pub fn to_codes(&self) -> [[i8; 8]; 8] {
        let mut codes = [[0i8; 8]; 8];
        for r in 0..8 {
            for c in 0..8 {
                codes[r][c] = self.squares[r][c].map_or(0, Piece::code);
            }
        }
        codes
    }

    pub fn in_bounds(row: i32, col: i32) -> bool {
        (0..8).contains(&row) && (0..8).contains(&col)
    }

    pub fn on_board(sq: Square) -> bool {
        sq.0 < 8 && sq.1 < 8
    }

    /// Piece on `sq`, or `None` for an empty or off-board square.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if Self::on_board(sq) {
            self.squares[sq.0][sq.1]
        } else {
            None
        }
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.0][sq.1] = piece;
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceType::King, color);
        self.pieces().find(|&(_, p)| p == king).map(|(sq, _)| sq)
    }

    /// Every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8usize)
            .flat_map(|r| (0..8usize).map(move |c| (r, c)))
            .filter_map(move |sq| self.squares[sq.0][sq.1].map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |&(_, p)| p.color == color)
    }

    /// Trial application: play `piece` from `from` to `to` on a copy of the
    /// board, including en passant removal, rook relocation and flag updates.
    /// `self` is never touched, so dropping the copy is the rollback.
    pub fn trial_move(&self, piece: Piece, from: Square, to: Square) -> Board {
        let mut scratch = self.clone();
        special::commit(&mut scratch, piece, from, to);
        scratch
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..8 {
            write!(f, "{} ", 8 - r)?;
            for c in 0..8 {
                let ch = self.squares[r][c].map_or('.', Piece::symbol);
                write!(f, "{ch}")?;
                if c < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
