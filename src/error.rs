use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Square;
use crate::piece::PieceType;

/// Why a move attempt was turned down. Rejections never change the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Rejection {
    /// The destination is off the board or holds one of the mover's own pieces
    #[error("destination is off the board or occupied by an own piece")]
    InvalidDestination,

    /// The piece cannot move that way
    #[error("the piece cannot move to that square")]
    IllegalGeometry,

    /// The move would leave (or put) the mover's own king in check
    #[error("the move would leave the king in check")]
    SelfCheckViolation,

    /// No piece was picked up on the origin square
    #[error("no piece selected")]
    NoSelection,

    /// The piece on the origin square belongs to the side not on move
    #[error("it is not that side's turn")]
    NotYourTurn,

    /// A promotion has to be resolved before play continues
    #[error("a pawn promotion is waiting for a piece choice")]
    AwaitingPromotion,

    /// The game has already ended
    #[error("the game is over")]
    GameOver,
}

/// Sometimes, bad stuff happens.
#[derive(Debug, Error)]
pub enum GameError {
    /// `resolve_promotion` was called with nothing to resolve
    #[error("no promotion is pending")]
    NoPromotionPending,

    /// The square given does not hold the pawn waiting to promote
    #[error("no promotable pawn on {0:?}")]
    PromotionSquareMismatch(Square),

    /// Pawns may not promote to this piece
    #[error("cannot promote to {0:?}")]
    InvalidPromotionPiece(PieceType),

    /// A square name outside a1..h8
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// A move string that is not coordinate notation such as "e2e4" or "a7a8q"
    #[error("invalid move notation: {0}")]
    InvalidMoveNotation(String),

    /// Game configuration could not be parsed
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
