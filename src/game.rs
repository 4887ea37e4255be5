// =============================================================================
// Game session
//
// Owns the live board and drives the per-game state machine:
//
//   AwaitingSelection -> AwaitingDestination -> MoveApplied
//     -> [PromotionPending ->] TurnCheck -> Check/Mate evaluation
//     -> Checkmate (terminal) | AwaitingSelection
//
// Legality is decided on scratch boards before anything is written, so the
// live board is only mutated by confirmed moves and never needs rolling back.
// =============================================================================

use std::collections::BTreeSet;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::check;
use crate::config::GameConfig;
use crate::error::{GameError, Rejection};
use crate::legality;
use crate::moves::{square_name, Move};
use crate::piece::{Color, Piece, PieceType};
use crate::special::{self, PromotionChoice};

/// Result of a move command, as seen by renderer and audio layers.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Rejected(Rejection),
    Applied,
    AppliedWithCheck,
    AppliedWithCheckmate,
    PromotionPending,
}

impl MoveOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, MoveOutcome::Rejected(_))
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    PromotionPending { square: Square },
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    config: GameConfig,
    selected: Option<Square>,
    status: GameStatus,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::from_board(Board::new(), config)
    }

    /// Start a session from an arbitrary position. The status is derived
    /// from the position, so a mated side to move starts as a finished game.
    pub fn from_board(board: Board, config: GameConfig) -> Self {
        let mut game = Game {
            board,
            config,
            selected: None,
            status: GameStatus::InProgress,
            history: Vec::new(),
        };
        let to_move = game.board.current_turn;
        if check::is_checkmate(&game.board, to_move) {
            game.status = GameStatus::Checkmate { winner: to_move.opposite() };
        } else if game.config.detect_stalemate && check::is_stalemate(&game.board, to_move) {
            game.status = GameStatus::Stalemate;
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_turn(&self) -> Color {
        self.board.current_turn
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }

    /// King square of the side to move when it stands in check.
    pub fn king_in_check(&self) -> Option<Square> {
        check::king_in_check_square(&self.board, self.board.current_turn)
    }

    /// Destinations the piece on `sq` may legally reach this turn. Empty for
    /// an empty square, an opponent's piece, or a game that is not awaiting a move.
    pub fn legal_moves(&self, sq: Square) -> BTreeSet<Square> {
        let movable = self
            .board
            .piece_at(sq)
            .is_some_and(|p| p.color == self.board.current_turn);
        if !movable || self.status != GameStatus::InProgress {
            return BTreeSet::new();
        }
        legality::legal_moves(&self.board, sq)
    }

    /// Click-style entry point. Picking up one of the mover's own pieces holds
    /// it (switching from any previously held piece) and returns `None`; any
    /// other square attempts a move from the held piece.
    pub fn select(&mut self, sq: Square) -> Option<MoveOutcome> {
        let own = self
            .board
            .piece_at(sq)
            .is_some_and(|p| p.color == self.board.current_turn);
        if own && self.status == GameStatus::InProgress {
            self.selected = Some(sq);
            return None;
        }
        match self.selected {
            Some(from) => Some(self.attempt_move(from, sq)),
            None => Some(MoveOutcome::Rejected(Rejection::NoSelection)),
        }
    }

    /// Try to play `from` -> `to` for the side to move. A rejected attempt
    /// leaves board, turn and flags exactly as they were. The selection is
    /// cleared either way.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> MoveOutcome {
        self.selected = None;
        match self.try_move(from, to) {
            Ok(outcome) => outcome,
            Err(rejection) => {
                trace!("rejected {}{}: {rejection}", name(from), name(to));
                MoveOutcome::Rejected(rejection)
            }
        }
    }

    fn try_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, Rejection> {
        match self.status {
            GameStatus::InProgress => {}
            GameStatus::PromotionPending { .. } => return Err(Rejection::AwaitingPromotion),
            GameStatus::Checkmate { .. } | GameStatus::Stalemate => return Err(Rejection::GameOver),
        }

        let piece = self.board.piece_at(from).ok_or(Rejection::NoSelection)?;
        if piece.color != self.board.current_turn {
            return Err(Rejection::NotYourTurn);
        }
        legality::check_move(&self.board, piece, from, to)?;

        // Confirmed: only now do the board, the castling flags and the en
        // passant target change.
        let effects = special::commit(&mut self.board, piece, from, to);
        self.history.push(Move { from, to, promotion: None });
        debug!(
            "{:?} {:?} {}{} captured={:?} en_passant={} castled={:?}",
            piece.color,
            piece.piece_type,
            name(from),
            name(to),
            effects.captured.map(|p| p.piece_type),
            effects.en_passant,
            effects.castled,
        );

        if effects.promotion_pending {
            if let Some(choice) = self.config.auto_promote {
                self.place_promoted(to, piece.color, choice);
                return Ok(self.finish_turn());
            }
            self.status = GameStatus::PromotionPending { square: to };
            debug!("promotion pending on {}", name(to));
            return Ok(MoveOutcome::PromotionPending);
        }

        Ok(self.finish_turn())
    }

    /// Second phase of a promotion: replace the waiting pawn on `sq` with
    /// `kind`, then hand the move to the opponent.
    pub fn resolve_promotion(&mut self, sq: Square, kind: PieceType) -> Result<MoveOutcome, GameError> {
        let GameStatus::PromotionPending { square } = self.status else {
            return Err(GameError::NoPromotionPending);
        };
        if square != sq {
            return Err(GameError::PromotionSquareMismatch(sq));
        }
        let choice = PromotionChoice::try_from(kind)?;
        let promoted = special::promote(&mut self.board, sq, choice)?;
        self.record_promotion(choice);
        debug!("promoted on {} to {:?}", name(sq), promoted.piece_type);
        Ok(self.finish_turn())
    }

    fn place_promoted(&mut self, sq: Square, color: Color, choice: PromotionChoice) {
        self.board.set(sq, Some(Piece::new(choice.piece_type(), color)));
        self.record_promotion(choice);
        debug!("auto-promoted on {} to {:?}", name(sq), choice);
    }

    fn record_promotion(&mut self, choice: PromotionChoice) {
        if let Some(last) = self.history.last_mut() {
            last.promotion = Some(choice.piece_type());
        }
    }

    /// Toggle the turn and evaluate the position for the side now on move.
    fn finish_turn(&mut self) -> MoveOutcome {
        let mover = self.board.current_turn;
        let opponent = mover.opposite();
        self.board.current_turn = opponent;
        self.status = GameStatus::InProgress;

        if check::is_checkmate(&self.board, opponent) {
            self.status = GameStatus::Checkmate { winner: mover };
            info!("checkmate after {} plies, {mover:?} wins", self.history.len());
            return MoveOutcome::AppliedWithCheckmate;
        }
        if check::is_king_in_check(&self.board, opponent) {
            return MoveOutcome::AppliedWithCheck;
        }
        if self.config.detect_stalemate && check::is_stalemate(&self.board, opponent) {
            self.status = GameStatus::Stalemate;
            info!("stalemate after {} plies", self.history.len());
        }
        MoveOutcome::Applied
    }
}

fn name(sq: Square) -> String {
    if Board::on_board(sq) {
        square_name(sq)
    } else {
        format!("{sq:?}")
    }
}
