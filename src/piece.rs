use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row direction of this side's pawns. White advances toward row 0.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    pub fn home_row(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn pawn_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which this side's pawns promote.
    pub fn promotion_row(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Magnitude of the integer code: pawn = 1 through king = 6.
    pub fn code(self) -> i8 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight => 2,
            PieceType::Bishop => 3,
            PieceType::Rook => 4,
            PieceType::Queen => 5,
            PieceType::King => 6,
        }
    }

    pub fn from_code(code: i8) -> Option<PieceType> {
        match code {
            1 => Some(PieceType::Pawn),
            2 => Some(PieceType::Knight),
            3 => Some(PieceType::Bishop),
            4 => Some(PieceType::Rook),
            5 => Some(PieceType::Queen),
            6 => Some(PieceType::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// Signed integer code: positive for white, negative for black.
    pub fn code(self) -> i8 {
        match self.color {
            Color::White => self.piece_type.code(),
            Color::Black => -self.piece_type.code(),
        }
    }

    /// Decode a signed piece code. Zero and out-of-range values decode to `None`.
    pub fn from_code(code: i8) -> Option<Piece> {
        let color = if code > 0 { Color::White } else { Color::Black };
        PieceType::from_code(code.checked_abs()?).map(|pt| Piece::new(pt, color))
    }

    pub fn is_enemy_of(self, other: Piece) -> bool {
        self.color != other.color
    }

    pub fn symbol(self) -> char {
        let c = match self.piece_type {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_sign_convention() {
        assert_eq!(Piece::new(PieceType::King, Color::White).code(), 6);
        assert_eq!(Piece::new(PieceType::Pawn, Color::Black).code(), -1);
        assert_eq!(Piece::from_code(-4), Some(Piece::new(PieceType::Rook, Color::Black)));
        assert_eq!(Piece::from_code(0), None);
        assert_eq!(Piece::from_code(7), None);
        assert_eq!(Piece::from_code(i8::MIN), None);
    }

    #[test]
    fn pawn_geometry_per_color() {
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.forward(), 1);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.home_row(), 0);
    }
}
