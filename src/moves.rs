use serde::{Deserialize, Serialize};

use crate::board::Square;
use crate::error::GameError;
use crate::piece::PieceType;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

/// Algebraic name of a square, e.g. (7, 4) -> "e1".
pub fn square_name(sq: Square) -> String {
    let file = (b'a' + sq.1 as u8) as char;
    let rank = (b'8' - sq.0 as u8) as char;
    format!("{file}{rank}")
}

/// Parse an algebraic square name such as "e4".
pub fn parse_square(s: &str) -> Result<Square, GameError> {
    match s.as_bytes() {
        &[f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(((b'8' - r) as usize, (f - b'a') as usize)),
        _ => Err(GameError::InvalidSquare(s.to_string())),
    }
}

impl Move {
    /// Convert to coordinate notation, e.g. "e2e4", "a7a8q"
    pub fn to_uci(&self) -> String {
        let promo = match self.promotion {
            Some(PieceType::Queen) => "q",
            Some(PieceType::Rook) => "r",
            Some(PieceType::Bishop) => "b",
            Some(PieceType::Knight) => "n",
            _ => "",
        };
        format!("{}{}{promo}", square_name(self.from), square_name(self.to))
    }

    /// Parse from coordinate notation
    pub fn from_uci(s: &str) -> Result<Move, GameError> {
        let invalid = || GameError::InvalidMoveNotation(s.to_string());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }
        let from = parse_square(&s[0..2]).map_err(|_| invalid())?;
        let to = parse_square(&s[2..4]).map_err(|_| invalid())?;
        let promotion = match s.as_bytes().get(4) {
            None => None,
            Some(b'q') => Some(PieceType::Queen),
            Some(b'r') => Some(PieceType::Rook),
            Some(b'b') => Some(PieceType::Bishop),
            Some(b'n') => Some(PieceType::Knight),
            Some(_) => return Err(invalid()),
        };
        Ok(Move { from, to, promotion })
    }
}
